use super::types::FileType;
use std::path::Path;

/// HDF4 containers are recognized by extension, everything else is a raw mask.
pub fn file_type_from_path(path: &Path) -> FileType {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("hdf") | Some("h4") | Some("hdf4") => FileType::Hdf4,
        _ => FileType::RawBinary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(
            file_type_from_path(Path::new("masks/amsr_gsfc_25n.hdf")),
            FileType::Hdf4
        );
        assert_eq!(file_type_from_path(Path::new("a/B_12S.HDF")), FileType::Hdf4);
        assert_eq!(
            file_type_from_path(Path::new("masks/pole_n.msk")),
            FileType::RawBinary
        );
        assert_eq!(file_type_from_path(Path::new("ntb_land")), FileType::RawBinary);
    }
}
