pub mod glyph_view;
pub mod help;
pub mod logs;
pub mod sheets;
pub mod table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabType {
    Sheets,
    Logs,
    Help,
}

impl TabType {
    pub const ALL: [TabType; 3] = [TabType::Sheets, TabType::Logs, TabType::Help];

    pub fn title(&self) -> &'static str {
        match self {
            TabType::Sheets => "Sheets",
            TabType::Logs => "Logs",
            TabType::Help => "Help",
        }
    }
}
