/// Summary of a forum's discussion, shown to readers once an administrator
/// asked for it to be generated
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Report {
    pub title: String,
    pub summary: String,
    pub key_themes: Vec<String>,
    pub sentiment: String,
}
