//! Film classes and the thermal update gate
//!
//! The film is the physical panel material. It determines how many
//! colours the panel can show and the inclusive temperature windows
//! inside which fast and normal updates are safe. Driving a panel
//! outside its window can damage the film, so the gate degrades the
//! requested mode in stages rather than refusing outright.

/// Update mode for a panel transfer.
///
/// `None` means "thermally unsafe, do not transfer". Callers are
/// expected to check the resolved mode before drawing; a flush that
/// sees a cached `None` is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum UpdateMode {
    /// No update is thermally safe.
    None,
    /// Full, ghost-clearing refresh.
    #[default]
    Normal,
    /// Partial refresh against the previously displayed frame.
    Fast,
}

/// Film (panel material) classes, decoded from the SKU film letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FilmKind {
    /// `C` - standard monochrome, normal update only.
    Standard,
    /// `H` - freezer film, normal update down to -25 C.
    Freezer,
    /// `J` - black/white/red "Spectra" (legacy `E` and `F` fold in here).
    Bwr,
    /// `G` - black/white/yellow, deprecated.
    Bwy,
    /// `Q` - black/white/red/yellow "Spectra 4", 2 bits per pixel.
    Bwry,
    /// `P` - monochrome with embedded fast update.
    Fast,
    /// `K` - wide temperature range with embedded fast update.
    Wide,
}

impl FilmKind {
    /// Decode a SKU film letter. Legacy BWR letters map to [`FilmKind::Bwr`].
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            b'C' => Some(Self::Standard),
            b'H' => Some(Self::Freezer),
            b'J' | b'E' | b'F' => Some(Self::Bwr),
            b'G' => Some(Self::Bwy),
            b'Q' => Some(Self::Bwry),
            b'P' => Some(Self::Fast),
            b'K' => Some(Self::Wide),
            _ => None,
        }
    }

    /// The canonical film letter.
    pub const fn code(self) -> u8 {
        match self {
            Self::Standard => b'C',
            Self::Freezer => b'H',
            Self::Bwr => b'J',
            Self::Bwy => b'G',
            Self::Bwry => b'Q',
            Self::Fast => b'P',
            Self::Wide => b'K',
        }
    }

    /// Number of colours the film can show natively (2, 3 or 4).
    pub const fn color_count(self) -> u8 {
        match self {
            Self::Standard | Self::Freezer | Self::Fast | Self::Wide => 2,
            Self::Bwr | Self::Bwy => 3,
            Self::Bwry => 4,
        }
    }

    /// Whether the film supports the embedded fast-update waveform.
    pub const fn has_fast_update(self) -> bool {
        matches!(self, Self::Fast | Self::Wide)
    }

    /// Inclusive temperature window for fast updates, in Celsius.
    ///
    /// `None` for films without fast-update hardware.
    pub const fn fast_window(self) -> Option<(i8, i8)> {
        match self {
            Self::Fast => Some((15, 30)),
            Self::Wide => Some((0, 50)),
            _ => None,
        }
    }

    /// Inclusive temperature window for normal updates, in Celsius.
    pub const fn normal_window(self) -> (i8, i8) {
        match self {
            Self::Standard => (0, 50),
            Self::Freezer => (-25, 30),
            Self::Bwr | Self::Bwy | Self::Bwry => (0, 40),
            Self::Fast => (0, 50),
            Self::Wide => (-15, 60),
        }
    }

    /// Name suffix used in the screen description, e.g. `"-Wide"`.
    pub const fn name_suffix(self) -> &'static str {
        match self {
            Self::Standard => "-BW",
            Self::Freezer => "-Freezer",
            Self::Bwr => "-BWR",
            Self::Bwy => "-BWY",
            Self::Bwry => "-BWRY",
            Self::Fast => "-Fast",
            Self::Wide => "-Wide",
        }
    }

    /// Resolve the thermally safe update mode for a request.
    ///
    /// Degradation is staged: a fast request outside the fast window
    /// falls back to normal, which is then itself checked against the
    /// normal window. Films without fast-update hardware only ever
    /// evaluate the normal window.
    pub fn resolve_update(self, requested: UpdateMode, temperature_c: i8) -> UpdateMode {
        let mut mode = match requested {
            UpdateMode::None => return UpdateMode::None,
            UpdateMode::Fast if self.has_fast_update() => UpdateMode::Fast,
            _ => UpdateMode::Normal,
        };

        if mode == UpdateMode::Fast {
            if let Some((low, high)) = self.fast_window() {
                if temperature_c < low || temperature_c > high {
                    mode = UpdateMode::Normal;
                }
            }
        }

        if mode == UpdateMode::Normal {
            let (low, high) = self.normal_window();
            if temperature_c < low || temperature_c > high {
                mode = UpdateMode::None;
            }
        }

        mode
    }
}
