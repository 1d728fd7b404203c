/// Platform/console identifiers for all supported systems.
///
/// Centralizes console identity — short names, display names, catalog
/// identifiers, and ROM file extensions — in one place so the rest of the
/// codebase never does ad-hoc string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Nes,
    Snes,
    N64,
    GameBoy,
    Gba,
    Genesis,
}

/// All platform variants in registration order.
const ALL_PLATFORMS: &[Platform] = &[
    Platform::Nes,
    Platform::Snes,
    Platform::N64,
    Platform::GameBoy,
    Platform::Gba,
    Platform::Genesis,
];

impl Platform {
    /// Canonical short name used for CLI arguments and identifiers.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Nes => "nes",
            Self::Snes => "snes",
            Self::N64 => "n64",
            Self::GameBoy => "gb",
            Self::Gba => "gba",
            Self::Genesis => "genesis",
        }
    }

    /// Full display name for the platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nes => "Nintendo Entertainment System",
            Self::Snes => "Super Nintendo Entertainment System",
            Self::N64 => "Nintendo 64",
            Self::GameBoy => "Game Boy / Game Boy Color",
            Self::Gba => "Game Boy Advance",
            Self::Genesis => "Sega Genesis / Mega Drive",
        }
    }

    /// Identifier used in catalog API requests and report lines (e.g. "NES").
    pub fn catalog_name(&self) -> &'static str {
        match self {
            Self::Nes => "NES",
            Self::Snes => "SNES",
            Self::N64 => "N64",
            Self::GameBoy => "GB",
            Self::Gba => "GBA",
            Self::Genesis => "GENESIS",
        }
    }

    /// Default ROM file extensions (lowercase, no dot) for this platform.
    pub fn default_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Nes => &["nes"],
            Self::Snes => &["smc", "sfc"],
            Self::N64 => &["z64", "n64", "v64"],
            Self::GameBoy => &["gb", "gbc"],
            Self::Gba => &["gba"],
            Self::Genesis => &["md", "gen", "smd"],
        }
    }

    /// All accepted names for this platform (case-insensitive matching).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Nes => &["nes", "famicom", "fc"],
            Self::Snes => &["snes", "sfc", "super famicom", "super nintendo"],
            Self::N64 => &["n64", "nintendo 64", "nintendo64"],
            Self::GameBoy => &["gb", "gbc", "gameboy", "game boy"],
            Self::Gba => &["gba", "game boy advance", "gameboy advance"],
            Self::Genesis => &["genesis", "megadrive", "mega drive", "md", "gen"],
        }
    }

    /// All platform variants.
    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.catalog_name())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone)]
pub struct PlatformParseError(pub String);

impl std::fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown platform: '{}'", self.0)
    }
}

impl std::error::Error for PlatformParseError {}

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Parse a platform from any recognized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        for &platform in ALL_PLATFORMS {
            if platform.short_name() == lower {
                return Ok(platform);
            }
            for alias in platform.aliases() {
                if *alias == lower {
                    return Ok(platform);
                }
            }
        }
        Err(PlatformParseError(s.to_string()))
    }
}
