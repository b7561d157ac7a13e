use uuid::Uuid;

/// Extension of a client-supplied file name: the text after the last `.`.
///
/// Returns an empty string when the name has no `.` or ends with one. The
/// extension is kept case-sensitive. Anything after the last `.` that still
/// contains a path separator is not an extension and yields `""`, so a stored
/// name built from it is always a single path component.
pub fn extract_ext(original_name: &str) -> &str {
    match original_name.rfind('.') {
        Some(pos) => {
            let ext = &original_name[pos + 1..];
            if ext.contains(['/', '\\', '\0']) {
                ""
            } else {
                ext
            }
        }
        None => "",
    }
}

/// Server-side name for an upload: a random v4 UUID followed by the original
/// extension. Without an extension the bare UUID is used (no trailing dot).
pub fn create_stored_name(original_name: &str) -> String {
    let id = Uuid::new_v4();
    match extract_ext(original_name) {
        "" => id.to_string(),
        ext => format!("{}.{}", id, ext),
    }
}

/// True when `name` is exactly one plain path component.
pub fn is_single_component(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }

    !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ext() {
        assert_eq!(extract_ext("image.png"), "png");
        assert_eq!(extract_ext("file.tar.gz"), "gz");
        assert_eq!(extract_ext("Photo.JPG"), "JPG");
        assert_eq!(extract_ext("file"), "");
        assert_eq!(extract_ext("archive."), "");
        assert_eq!(extract_ext(".gitignore"), "gitignore");
        assert_eq!(extract_ext(""), "");
    }

    #[test]
    fn test_extract_ext_ignores_separators() {
        assert_eq!(extract_ext("a.b/c"), "");
        assert_eq!(extract_ext("x.y\\..\\z"), "");
    }

    #[test]
    fn test_create_stored_name_keeps_extension() {
        let name = create_stored_name("invoice.pdf");
        let (id, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "pdf");
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_create_stored_name_without_extension() {
        let name = create_stored_name("README");
        assert!(!name.contains('.'));
        assert!(Uuid::parse_str(&name).is_ok());
    }

    #[test]
    fn test_create_stored_name_dotfile() {
        let name = create_stored_name(".gitignore");
        assert!(name.ends_with(".gitignore"));
        assert_eq!(name.len(), 36 + ".gitignore".len());
    }

    #[test]
    fn test_is_single_component() {
        assert!(is_single_component("abc.png"));
        assert!(is_single_component(".hidden"));
        assert!(!is_single_component(""));
        assert!(!is_single_component("."));
        assert!(!is_single_component(".."));
        assert!(!is_single_component("../secret"));
        assert!(!is_single_component("a/b.png"));
        assert!(!is_single_component("a\\b.png"));
    }
}
