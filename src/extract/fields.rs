use std::path::{Path, PathBuf};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::core::Record;
use crate::error::{Error, Result};
use crate::extract::docx;

/// 按行模式从文档正文抽取简历字段
///
/// 规则（每行只命中第一条，后出现的行覆盖先前的值）：
/// - 含独立词 `NIM` → identifier = 该行全部 ASCII 数字
/// - `Nama Lengkap :` → name
/// - `Pilihan 1 :` / `Pilihan 2 :` → 两个志愿
///
/// 缺失的字段保持空串，不报错。
pub struct FieldParser {
    nim: Regex,
    name: Regex,
    first_choice: Regex,
    second_choice: Regex,
}

impl FieldParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            nim: Regex::new(r"\bNIM\b")?,
            name: Regex::new(r"\bNama Lengkap\s*:")?,
            first_choice: Regex::new(r"\bPilihan 1\s*:")?,
            second_choice: Regex::new(r"\bPilihan 2\s*:")?,
        })
    }

    pub fn parse(&self, text: &str, source: Option<PathBuf>) -> Record {
        let mut identifier = String::new();
        let mut name = String::new();
        let mut first = String::new();
        let mut second = String::new();

        for line in text.lines() {
            if self.nim.is_match(line) {
                identifier = line.chars().filter(|c| c.is_ascii_digit()).collect();
            } else if self.name.is_match(line) {
                name = strip_label(&self.name, line);
            } else if self.first_choice.is_match(line) {
                first = strip_label(&self.first_choice, line);
            } else if self.second_choice.is_match(line) {
                second = strip_label(&self.second_choice, line);
            }
        }

        Record::new(identifier, name, first, second, source)
    }

    /// 读取单个文档：`.docx` 解包取正文，其余按纯文本读（非 UTF-8 字节按替换字符处理）
    pub fn parse_file(&self, path: &Path) -> Result<Record> {
        let is_docx = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("docx"));

        let text = if is_docx {
            docx::read_text(path)?
        } else {
            let bytes = std::fs::read(path).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
            String::from_utf8_lossy(&bytes).into_owned()
        };
        Ok(self.parse(&text, Some(path.to_path_buf())))
    }
}

/// 去掉第一处标签，保留其余内容（含标签前的前缀），首尾去空白后做 NFC 规范化
fn strip_label(label: &Regex, line: &str) -> String {
    label.replacen(line, 1, "").trim().nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FieldParser {
        FieldParser::new().unwrap()
    }

    #[test]
    fn parses_all_fields() {
        let text = "FORMULIR PENDAFTARAN\n\
                    NIM : 1301-2045-77\n\
                    Nama Lengkap : Siti Rahma \n\
                    Pilihan 1: Divisi Riset\n\
                    Pilihan 2 :Divisi Humas\n";
        let r = parser().parse(text, None);
        assert_eq!(r.identifier(), "1301204577");
        assert_eq!(r.name(), "Siti Rahma");
        assert_eq!(r.preference_one(), "Divisi Riset");
        assert_eq!(r.preference_two(), "Divisi Humas");
    }

    #[test]
    fn missing_fields_stay_empty() {
        let r = parser().parse("Nama Lengkap: Joko\n", None);
        assert_eq!(r.identifier(), "");
        assert_eq!(r.name(), "Joko");
        assert_eq!(r.preference_one(), "");
        assert_eq!(r.preference_two(), "");
    }

    #[test]
    fn nim_requires_whole_word() {
        let r = parser().parse("NIMBUS 123\nnim 456\n", None);
        assert_eq!(r.identifier(), "");
    }

    #[test]
    fn later_lines_overwrite_earlier() {
        let r = parser().parse("NIM 1\nNIM 2\n", None);
        assert_eq!(r.identifier(), "2");
    }

    #[test]
    fn prefix_before_label_is_kept() {
        let r = parser().parse("1. Nama Lengkap : Dewi\r\n", None);
        assert_eq!(r.name(), "1.  Dewi");
    }

    #[test]
    fn names_are_nfc_normalized() {
        // "e" + U+0301 组合重音 → U+00E9
        let r = parser().parse("Nama Lengkap: Rene\u{301}\n", None);
        assert_eq!(r.name(), "Ren\u{e9}");
    }

    fn write_docx(path: &Path, paragraphs: &[&str]) {
        use std::io::Write;

        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
            .collect();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{}</w:body></w:document>",
            body
        );

        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let opts = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        zip.start_file("[Content_Types].xml", opts).unwrap();
        zip.write_all(b"<?xml version=\"1.0\"?><Types/>").unwrap();
        zip.start_file("word/document.xml", opts).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn parses_generated_docx() {
        let dir = std::env::temp_dir().join(format!(
            "cv-index-docx-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Siti.DOCX");
        write_docx(
            &path,
            &[
                "FORMULIR PENDAFTARAN",
                "NIM : 1301-2045",
                "Nama Lengkap : Siti Rahma",
                "Pilihan 1 : Divisi Riset",
                "Pilihan 2 : Divisi Humas &amp; Media",
            ],
        );

        let r = parser().parse_file(&path).unwrap();
        assert_eq!(r.identifier(), "13012045");
        assert_eq!(r.name(), "Siti Rahma");
        assert_eq!(r.preference_one(), "Divisi Riset");
        assert_eq!(r.preference_two(), "Divisi Humas & Media");
        assert_eq!(r.source(), Some(path.as_path()));
    }
}
