//! Built-in naming conventions.
//!
//! Order matters: most specific first. Directory-based layouts come before
//! single-name layouts, and "track title" comes before "artist - title" so
//! `01 - Song.mp3` is not read as artist "01".

/// (name, regex) pairs, highest priority first.
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    (
        "artist/year - album/track title",
        r"^(?P<artist>[^/]+)/(?P<year>\d{4}) - (?P<album>[^/]+)/(?P<track>\d+)(?:\s*-\s*|\.\s*|\s+)(?P<title>[^/]+)\.[^./]+$",
    ),
    (
        "artist/album/disc-track title",
        r"^(?P<artist>[^/]+)/(?P<album>[^/]+)/(?P<disc>\d)-(?P<track>\d+)(?:\s*-\s*|\.\s*|\s+)(?P<title>[^/]+)\.[^./]+$",
    ),
    (
        "artist/album/track title",
        r"^(?P<artist>[^/]+)/(?P<album>[^/]+)/(?P<track>\d+)(?:\s*-\s*|\.\s*|\s+)(?P<title>[^/]+)\.[^./]+$",
    ),
    (
        "artist - album - track - title",
        r"^(?P<artist>[^/]+?) - (?P<album>[^/]+?) - (?P<track>\d+) - (?P<title>[^/]+)\.[^./]+$",
    ),
    (
        "track - artist - title",
        r"^(?P<track>\d+)(?:\s*-\s*|\.\s*)(?P<artist>[^/]+?) - (?P<title>[^/]+)\.[^./]+$",
    ),
    (
        "track title",
        r"^(?P<track>\d+)(?:\s*-\s*|\.\s*|\s+)(?P<title>[^/]+)\.[^./]+$",
    ),
    (
        "artist - title",
        r"^(?P<artist>[^/]+?) - (?P<title>[^/]+)\.[^./]+$",
    ),
];
