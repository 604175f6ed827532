use crate::errors::{Result, StoreError};
use crate::types::PackageDescriptor;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Metadata resource shipped at the top of a package.
pub const DESCRIPTOR_FILE: &str = "description.txt";

/// Parse the bracket-sectioned `description.txt` format.
///
/// ```text
/// [description]
/// A tiny text editor
/// [version]
/// 1.2
/// [requirements]
/// rich
/// pyfiglet
/// ```
///
/// `requirements` collects every line; other sections keep their last line.
/// Unknown sections and text before the first header are ignored.
pub fn parse_descriptor(content: &str) -> PackageDescriptor {
    let mut desc = PackageDescriptor::default();
    let mut section: Option<String> = None;

    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
            section = Some(line[1..line.len() - 1].trim().to_lowercase());
            continue;
        }
        match section.as_deref() {
            Some("description") => desc.description = line.to_string(),
            Some("author") => desc.author = line.to_string(),
            Some("version") => desc.version = line.to_string(),
            Some("requirements") => desc.requirements.push(line.to_string()),
            _ => {}
        }
    }

    desc
}

/// Read `<package_dir>/description.txt`; `None` if the package ships none.
pub fn read_local(package_dir: &Path) -> Result<Option<PackageDescriptor>> {
    let path = package_dir.join(DESCRIPTOR_FILE);
    match fs::read(&path) {
        Ok(bytes) => Ok(Some(parse_descriptor(&String::from_utf8_lossy(&bytes)))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::fs(path, e)),
    }
}
