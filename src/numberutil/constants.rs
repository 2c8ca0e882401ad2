// The minimum and maximum number of digits in a national significant
// number. The upper bound goes beyond the ITU recommendation of 15 because
// longer numbers have been observed in Germany.
pub const MIN_LENGTH_FOR_NSN: usize = 2;
pub const MAX_LENGTH_FOR_NSN: usize = 17;

/// The maximum length of the country calling code.
pub const MAX_LENGTH_COUNTRY_CODE: usize = 3;

/// Inputs longer than this are rejected before any other inspection, which
/// also bounds the work the parsing regexes can be made to do.
pub const MAX_INPUT_STRING_LENGTH: usize = 250;

pub const NANPA_COUNTRY_CODE: i32 = 1;

pub const REGION_CODE_FOR_NON_GEO_ENTITY: &str = "001";
pub const UNKNOWN_REGION: &str = "ZZ";

pub const PLUS_SIGN: &str = "+";
pub const STAR_SIGN: &str = "*";
pub const PLUS_CHARS: &str = "+\u{FF0B}";

pub const RFC3966_PREFIX: &str = "tel:";
pub const RFC3966_PHONE_CONTEXT: &str = ";phone-context=";
pub const RFC3966_ISDN_SUBADDRESS: &str = ";isub=";
pub const RFC3966_EXTN_PREFIX: &str = ";ext=";

/// Digits acceptable in a phone number: ASCII, fullwidth, Arabic-Indic and
/// Eastern-Arabic variants. Written as the body of a regex character class.
pub const VALID_DIGITS: &str = "0-9\u{FF10}-\u{FF19}\u{0660}-\u{0669}\u{06F0}-\u{06F9}";

// Punctuation acceptable inside a phone number, as a character-class body:
// the dash family, whitespace variants, brackets, full stops, slashes and
// tildes. The letter 'x' is included since it shows up as a carrier-code
// placeholder. Punctuation acceptable as a leading character is narrower
// and handled separately.
pub const VALID_PUNCTUATION: &str = "-x\u{2010}-\u{2015}\u{2212}\u{30FC}\u{FF0D}-\u{FF0F} \
\u{00A0}\u{00AD}\u{200B}\u{2060}\u{3000}()\u{FF08}\u{FF09}\u{FF3B}\u{FF3D}.\\[\\]/~\u{2053}\
\u{223C}\u{FF5E}";

pub const VALID_ALPHA: &str = "a-z";
pub const VALID_ALPHA_INCL_UPPERCASE: &str = "A-Za-z";

/// Characters that start a second phone number glued onto the first, e.g.
/// `(530) 583-6985 x302/x2303`; everything from the marker on is dropped
/// so the first number parses cleanly.
pub const SECOND_NUMBER_START: &str = r"[\\/] *x";

/// Prefix put before an extension when no region preference exists.
pub const DEFAULT_EXTN_PREFIX: &str = " ext. ";

/// Recognizes an international prefix that is a single digit sequence
/// (possibly split by a wait-for-tone tilde) rather than a regex over
/// several alternatives.
pub const SINGLE_INTERNATIONAL_PREFIX: &str =
    "[\\d]+(?:[~\u{2053}\u{223C}\u{FF5E}][\\d]+)?";

/// IDD pattern that cannot match anything, used when the default region has
/// no metadata to take the IDD pattern from.
pub(crate) const UNMATCHABLE_IDD_PREFIX: &str = "NonMatch";
