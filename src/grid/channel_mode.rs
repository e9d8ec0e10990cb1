/// Channel-mode tag of a grid, in the spirit of image mode codes: a single
/// letter for one channel, three letters for RGB, four for RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    L,
    La,
    Rgb,
    Rgba,
    /// Channel counts without a conventional meaning.
    Other(usize),
}

impl ChannelMode {
    pub fn from_channels(channels: usize) -> Self {
        match channels {
            1 => ChannelMode::L,
            2 => ChannelMode::La,
            3 => ChannelMode::Rgb,
            4 => ChannelMode::Rgba,
            n => ChannelMode::Other(n),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            ChannelMode::L => 1,
            ChannelMode::La => 2,
            ChannelMode::Rgb => 3,
            ChannelMode::Rgba => 4,
            ChannelMode::Other(n) => *n,
        }
    }

    /// The mode code, e.g. `"RGB"`.
    pub fn tag(&self) -> String {
        match self {
            ChannelMode::L => "L".to_string(),
            ChannelMode::La => "LA".to_string(),
            ChannelMode::Rgb => "RGB".to_string(),
            ChannelMode::Rgba => "RGBA".to_string(),
            ChannelMode::Other(n) => format!("{n}C"),
        }
    }

    /// Names of the per-channel columns of tagged-pixel text.
    pub fn column_names(&self) -> Vec<String> {
        match self {
            ChannelMode::L => vec!["Value".to_string()],
            ChannelMode::Other(n) => (0..*n).map(|c| format!("C{c}")).collect(),
            mode => mode.tag().chars().map(String::from).collect(),
        }
    }
}

impl std::fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
