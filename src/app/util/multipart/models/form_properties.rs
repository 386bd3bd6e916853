use super::file_properties::FileProperties;

#[derive(Debug, Default)]
pub struct FormProperties {
    pub files: Vec<FileProperties>,
    pub texts: Vec<(String, String)>,
}

impl FormProperties {
    pub fn text(&self, field_name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(name, _)| name == field_name)
            .map(|(_, value)| value.as_str())
    }

    /// Takes the file part named `field_name`, falling back to the first file.
    pub fn take_file(&mut self, field_name: &str) -> Option<FileProperties> {
        if self.files.is_empty() {
            return None;
        }

        let index = self
            .files
            .iter()
            .position(|f| f.field_name == field_name)
            .unwrap_or(0);

        Some(self.files.remove(index))
    }
}
