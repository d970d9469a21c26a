//! Extension-based file categorization.
//!
//! This module defines the fixed set of destination categories and the ordered
//! table that maps lowercase file extensions to them. Lookups walk the table in
//! declaration order and the first matching category wins.
//!
//! # Examples
//!
//! ```
//! use foldersort::file_category::{Category, CategoryTable};
//!
//! let table = CategoryTable::standard();
//! assert_eq!(table.classify_name("report.pdf"), Category::Documents);
//! assert_eq!(table.classify_name("IMG.PNG"), Category::Images);
//! assert_eq!(table.classify_name("notes"), Category::Misc);
//! ```

/// A destination bucket for top-level entries.
///
/// The variant order is the declaration order used for lookups, counts and
/// summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Documents (PDF, DOCX, TXT, spreadsheets, slides)
    Documents,
    /// Image files (PNG, JPG, GIF, etc.)
    Images,
    /// Audio files (MP3, WAV, FLAC, etc.)
    Audio,
    /// Video files (MP4, MKV, AVI, etc.)
    Video,
    /// Archive files (ZIP, RAR, 7Z, etc.)
    Archives,
    /// Executables and scripts (EXE, BAT, SH, etc.)
    Executables,
    /// Files whose extension matches no other category
    Misc,
    /// Top-level subdirectories
    Folders,
}

impl Category {
    /// Number of categories, `Misc` and `Folders` included.
    pub const COUNT: usize = 8;

    /// Every category in declaration order, including the catch-all `Misc`
    /// and the implicit `Folders`.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Documents,
        Category::Images,
        Category::Audio,
        Category::Video,
        Category::Archives,
        Category::Executables,
        Category::Misc,
        Category::Folders,
    ];

    /// Returns the category name, which is also its subdirectory name.
    ///
    /// ```
    /// use foldersort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Folders.dir_name(), "Folders");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Audio => "Audio",
            Category::Video => "Video",
            Category::Archives => "Archives",
            Category::Executables => "Executables",
            Category::Misc => "Misc",
            Category::Folders => "Folders",
        }
    }

    /// Position of this category in declaration order.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Returns true if `name` is the destination directory of any category.
    ///
    /// The comparison is exact; a folder called `documents` is not treated as
    /// a destination.
    pub fn is_destination_name(name: &str) -> bool {
        Self::ALL.iter().any(|c| c.dir_name() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Returns the classification key of a file name: the text after the last
/// `.`, lowercased. Names without a `.` yield an empty string.
///
/// ```
/// use foldersort::file_category::extension_of;
///
/// assert_eq!(extension_of("backup.TAR.GZ"), "gz");
/// assert_eq!(extension_of("README"), "");
/// assert_eq!(extension_of("trailing."), "");
/// ```
pub fn extension_of(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) => file_name[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "xls", "xlsx", "ppt", "pptx"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "svg"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "flac", "ogg", "wma"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "flv", "avi", "mov", "wmv"];
const ARCHIVE_EXTENSIONS: &[&str] = &["rar", "zip", "tar", "gz", "7z"];
const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "bat", "sh", "bin", "msi"];

/// The ordered extension table used to classify files.
///
/// Only extension-bearing categories appear in the table. `Misc` and `Folders`
/// are always valid destinations but never matched by extension.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: Vec<(Category, &'static [&'static str])>,
}

impl CategoryTable {
    /// Builds the standard table.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                (Category::Documents, DOCUMENT_EXTENSIONS),
                (Category::Images, IMAGE_EXTENSIONS),
                (Category::Audio, AUDIO_EXTENSIONS),
                (Category::Video, VIDEO_EXTENSIONS),
                (Category::Archives, ARCHIVE_EXTENSIONS),
                (Category::Executables, EXECUTABLE_EXTENSIONS),
            ],
        }
    }

    /// Maps an extension (without leading dot) to its category.
    ///
    /// Matching is case-insensitive. Unknown and empty extensions map to
    /// `Category::Misc`; this never fails.
    pub fn classify_extension(&self, ext: &str) -> Category {
        let ext = ext.to_lowercase();
        self.entries
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Misc)
    }

    /// Classifies a file by name.
    pub fn classify_name(&self, file_name: &str) -> Category {
        self.classify_extension(&extension_of(file_name))
    }

    /// Returns the extensions registered for `category` (empty for `Misc`
    /// and `Folders`).
    pub fn extensions(&self, category: Category) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, exts)| *exts)
            .unwrap_or(&[])
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}
