use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Caafiye";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/Caafiye/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Caafiye")
}

/// Get the models directory (trained pipeline artifacts)
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

/// Feature schema exported alongside the trained pipeline.
pub fn feature_schema_path() -> PathBuf {
    models_dir().join("feature_schema.json")
}

/// Label-encoder class list exported alongside the trained pipeline.
pub fn label_classes_path() -> PathBuf {
    models_dir().join("classes.json")
}
