pub const HOT_DOG: &str = "Hot Dog";
pub const NOT_HOT_DOG: &str = "Not Hot Dog";

/// How the client reads a result string. Matching is exact and
/// case-sensitive; the raw text is kept separately by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    HotDog,
    NotHotDog,
    Other,
}

impl Verdict {
    pub fn classify(result: &str) -> Self {
        match result {
            HOT_DOG => Verdict::HotDog,
            NOT_HOT_DOG => Verdict::NotHotDog,
            _ => Verdict::Other,
        }
    }

    pub fn overlay(self) -> Option<Overlay> {
        match self {
            Verdict::HotDog => Some(Overlay {
                icon: "/images/checkmark.png",
                alt: "Definitely a Hot Dog",
                caption: "Hot Dog!!!",
                class: "result-hotdog",
            }),
            Verdict::NotHotDog => Some(Overlay {
                icon: "/images/redx.png",
                alt: "Sorry, not a Hot Dog",
                caption: "Not Hot Dog!",
                class: "result-nothotdog",
            }),
            Verdict::Other => None,
        }
    }

    pub fn sound(self) -> Option<Sound> {
        match self {
            Verdict::HotDog => Some(Sound::Ding),
            Verdict::NotHotDog => Some(Sound::Buzzer),
            Verdict::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub icon: &'static str,
    pub alt: &'static str,
    pub caption: &'static str,
    pub class: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Ding,
    Buzzer,
}

impl Sound {
    pub fn asset_path(self) -> &'static str {
        match self {
            Sound::Ding => "/sounds/ding.mp3",
            Sound::Buzzer => "/sounds/buzzer.mp3",
        }
    }
}
