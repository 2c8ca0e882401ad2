//! Region-code string helpers for tests, so region names read the same
//! way everywhere in the suite.

pub(crate) struct RegionCode;

#[allow(dead_code)]
impl RegionCode {
    pub fn ar() -> &'static str {
        "AR"
    }

    pub fn au() -> &'static str {
        "AU"
    }

    pub fn br() -> &'static str {
        "BR"
    }

    pub fn bs() -> &'static str {
        "BS"
    }

    pub fn de() -> &'static str {
        "DE"
    }

    pub fn gb() -> &'static str {
        "GB"
    }

    pub fn it() -> &'static str {
        "IT"
    }

    pub fn nz() -> &'static str {
        "NZ"
    }

    pub fn us() -> &'static str {
        "US"
    }

    /// The sentinel for non-geographic entities.
    pub fn un001() -> &'static str {
        "001"
    }

    /// The sentinel for the unknown region.
    pub fn zz() -> &'static str {
        "ZZ"
    }

    pub fn get_unknown() -> &'static str {
        Self::zz()
    }
}
