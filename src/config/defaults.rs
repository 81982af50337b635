//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [pages] Section Defaults
// ============================================================================

pub mod pages {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        "./src/pages/".into()
    }

    pub fn extension() -> String {
        "html".into()
    }

    pub fn main_page() -> PathBuf {
        "./src/index.html".into()
    }

    pub fn destination() -> PathBuf {
        "./pages/".into()
    }

    pub fn aggregator() -> PathBuf {
        "./watch_html.js".into()
    }

    pub fn entry_name() -> String {
        "watch_html".into()
    }
}

// ============================================================================
// [bundle] Section Defaults
// ============================================================================

pub mod bundle {
    use std::{collections::BTreeMap, path::PathBuf};

    pub fn main() -> PathBuf {
        "./src/app.js".into()
    }

    pub fn output() -> PathBuf {
        "./dist".into()
    }

    pub fn filename() -> String {
        "js/[name].js".into()
    }

    pub fn public_path() -> String {
        "/".into()
    }

    pub fn alias() -> BTreeMap<String, PathBuf> {
        BTreeMap::from([("@".to_owned(), PathBuf::from("./src"))])
    }

    pub fn template() -> PathBuf {
        "./src/index.html".into()
    }

    pub fn inject() -> String {
        "head".into()
    }

    pub fn chunks() -> String {
        "all".into()
    }

    pub mod copy {
        use std::path::PathBuf;

        pub fn from() -> PathBuf {
            "./src/public/".into()
        }

        pub fn to() -> PathBuf {
            "./dist/public/".into()
        }

        pub fn ignore() -> Vec<String> {
            vec![".DS_Store".into()]
        }
    }
}
