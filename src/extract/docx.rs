use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};

/// .docx 正文所在的 zip 条目
const DOCUMENT_XML: &str = "word/document.xml";

/// 读取 .docx 的纯文本：每个段落一行
pub fn read_text(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| Error::Docx {
        path: path.to_path_buf(),
        source,
    })?;
    let mut entry = archive.by_name(DOCUMENT_XML).map_err(|source| Error::Docx {
        path: path.to_path_buf(),
        source,
    })?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    document_text(&xml).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// 从 document.xml 抽文本
///
/// 只取 `<w:t>` 内的文字；`</w:p>` 换行，`<w:tab/>` 转制表符，`<w:br/>` / `<w:cr/>` 换行。
/// 同一段落被拆成多个 run 时会原样拼接。
pub fn document_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" | b"p" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
