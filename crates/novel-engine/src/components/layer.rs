/// Render layer: controls draw order and hit-test priority for quads.
///
/// Layers are drawn back-to-front: Backdrop first, Modal last.
/// Hit-testing walks them front-to-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Backdrop = 0,
    Characters = 1,
    #[default]
    Content = 2,
    Dialogue = 3,
    Choices = 4,
    Overlay = 5,
    Modal = 6,
}

impl RenderLayer {
    pub const COUNT: usize = 7;

    /// Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Backdrop),
            1 => Some(Self::Characters),
            2 => Some(Self::Content),
            3 => Some(Self::Dialogue),
            4 => Some(Self::Choices),
            5 => Some(Self::Overlay),
            6 => Some(Self::Modal),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
