//! `maven-metadata.xml` parsing.
//!
//! Only the version list is extracted:
//!
//! ```xml
//! <metadata>
//!   <versioning>
//!     <versions>
//!       <version>1.0</version>
//!       <version>1.1</version>
//!     </versions>
//!   </versioning>
//! </metadata>
//! ```

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

const VERSION_PATH: [&str; 4] = ["metadata", "versioning", "versions", "version"];

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to parse maven-metadata.xml: {message}")]
    Xml { message: String },
}

/// Raw text of every `metadata/versioning/versions/version` element, in
/// document order. Empty elements yield empty strings so callers can report
/// them by index.
pub fn parse_maven_metadata(content: &str) -> Result<Vec<String>, MetadataError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    let mut versions = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| MetadataError::Xml {
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                if at_version(&path) {
                    current = Some(String::new());
                }
            }
            Event::Empty(ref e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                if at_version(&path) {
                    versions.push(String::new());
                }
                path.pop();
            }
            Event::Text(ref e) => {
                if let Some(text) = current.as_mut() {
                    let decoded = match e.decode() {
                        Ok(cow) => quick_xml::escape::unescape(&cow)
                            .map(|c| c.into_owned())
                            .unwrap_or_else(|_| cow.into_owned()),
                        Err(_) => String::from_utf8_lossy(e.as_ref()).to_string(),
                    };
                    text.push_str(&decoded);
                }
            }
            Event::CData(e) => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(_) => {
                if at_version(&path)
                    && let Some(text) = current.take()
                {
                    versions.push(text.trim().to_string());
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(versions)
}

fn at_version(path: &[String]) -> bool {
    path.len() == VERSION_PATH.len() && path.iter().zip(VERSION_PATH).all(|(a, b)| a == b)
}
