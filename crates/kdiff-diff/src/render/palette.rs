/// Semantic tag of a report line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Addition,
    Removal,
    Modification,
    /// The `!` marker on structural changes of an identity list.
    Taint,
}

/// Decorates report text according to its tone.
pub trait Palette {
    fn paint(&self, tone: Tone, text: &str) -> String;
}

/// Leaves text undecorated.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainPalette;

impl Palette for PlainPalette {
    fn paint(&self, _tone: Tone, text: &str) -> String {
        text.to_string()
    }
}

impl<P: Palette + ?Sized> Palette for &P {
    fn paint(&self, tone: Tone, text: &str) -> String {
        (**self).paint(tone, text)
    }
}
