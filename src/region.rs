//! Administrative region codes
//!
//! The upstream service identifies a district by the first five digits of
//! its legal-dong code (`LAWD_CD`). This module holds the static table of
//! supported districts and the lookup seam the query service resolves
//! region names and codes through.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Province name for Seoul districts
pub const SEOUL: &str = "서울특별시";

/// Province name for Gyeonggi-do cities and counties
pub const GYEONGGI: &str = "경기도";

/// One administrative district
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    /// 5-digit region code
    pub code: &'static str,
    /// District name, unique within the table
    pub name: &'static str,
    /// Province the district belongs to
    pub sido: &'static str,
}

const fn region(code: &'static str, name: &'static str, sido: &'static str) -> Region {
    Region { code, name, sido }
}

/// Every supported district
pub static REGIONS: &[Region] = &[
    region("11110", "종로구", SEOUL),
    region("11140", "중구", SEOUL),
    region("11170", "용산구", SEOUL),
    region("11200", "성동구", SEOUL),
    region("11215", "광진구", SEOUL),
    region("11230", "동대문구", SEOUL),
    region("11260", "중랑구", SEOUL),
    region("11290", "성북구", SEOUL),
    region("11305", "강북구", SEOUL),
    region("11320", "도봉구", SEOUL),
    region("11350", "노원구", SEOUL),
    region("11380", "은평구", SEOUL),
    region("11410", "서대문구", SEOUL),
    region("11440", "마포구", SEOUL),
    region("11470", "양천구", SEOUL),
    region("11500", "강서구", SEOUL),
    region("11530", "구로구", SEOUL),
    region("11545", "금천구", SEOUL),
    region("11560", "영등포구", SEOUL),
    region("11590", "동작구", SEOUL),
    region("11620", "관악구", SEOUL),
    region("11650", "서초구", SEOUL),
    region("11680", "강남구", SEOUL),
    region("11710", "송파구", SEOUL),
    region("11740", "강동구", SEOUL),
    region("41110", "수원시", GYEONGGI),
    region("41130", "성남시", GYEONGGI),
    region("41150", "의정부시", GYEONGGI),
    region("41170", "안양시", GYEONGGI),
    region("41190", "부천시", GYEONGGI),
    region("41210", "광명시", GYEONGGI),
    region("41220", "평택시", GYEONGGI),
    region("41250", "동두천시", GYEONGGI),
    region("41270", "안산시", GYEONGGI),
    region("41280", "화성시", GYEONGGI),
    region("41310", "구리시", GYEONGGI),
    region("41330", "남양주시(구)", GYEONGGI),
    region("41360", "오산시", GYEONGGI),
    region("41390", "시흥시", GYEONGGI),
    region("41410", "군포시", GYEONGGI),
    region("41430", "용인시", GYEONGGI),
    region("41450", "의왕시", GYEONGGI),
    region("41460", "파주시", GYEONGGI),
    region("41470", "하남시", GYEONGGI),
    region("41480", "이천시", GYEONGGI),
    region("41550", "안성시", GYEONGGI),
    region("41570", "김포시", GYEONGGI),
    region("41610", "광주시", GYEONGGI),
    region("41620", "포천시", GYEONGGI),
    region("41630", "여주시", GYEONGGI),
    region("41650", "양주시", GYEONGGI),
    region("41670", "남양주시", GYEONGGI),
    region("41730", "양평군", GYEONGGI),
    region("41820", "가평군", GYEONGGI),
    region("41830", "연천군", GYEONGGI),
];

static BY_CODE: LazyLock<HashMap<&'static str, &'static Region>> =
    LazyLock::new(|| REGIONS.iter().map(|r| (r.code, r)).collect());

static BY_NAME: LazyLock<HashMap<&'static str, &'static Region>> =
    LazyLock::new(|| REGIONS.iter().map(|r| (r.name, r)).collect());

/// Check whether a string has the shape of a region code (5 ASCII digits)
pub fn is_code_shaped(value: &str) -> bool {
    value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Region lookup consumed by the query service
pub trait RegionLookup: Send + Sync {
    /// Find a region by its 5-digit code
    fn by_code(&self, code: &str) -> Option<Region>;

    /// Find a region by its name
    fn by_name(&self, name: &str) -> Option<Region>;

    /// All regions, in table order
    fn regions(&self) -> Vec<Region>;

    /// Code for a district name
    fn code_for(&self, name: &str) -> Option<&'static str> {
        self.by_name(name.trim()).map(|r| r.code)
    }

    /// Name for a region code
    fn name_for(&self, code: &str) -> Option<&'static str> {
        self.by_code(code.trim()).map(|r| r.name)
    }

    /// Resolve a code to its name, or a name to its code
    fn resolve(&self, key: &str) -> Option<&'static str> {
        let key = key.trim();
        if is_code_shaped(key) {
            self.name_for(key)
        } else {
            self.code_for(key)
        }
    }

    /// Whether the key is a known code or name
    fn is_valid(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    /// Regions of one province
    fn regions_in(&self, sido: &str) -> Vec<Region> {
        self.regions()
            .into_iter()
            .filter(|r| r.sido == sido.trim())
            .collect()
    }

    /// Code-to-name mapping, ordered by code
    fn code_name_mapping(&self) -> BTreeMap<&'static str, &'static str> {
        self.regions().into_iter().map(|r| (r.code, r.name)).collect()
    }
}

/// Lookup over the built-in region table
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRegions;

impl RegionLookup for StaticRegions {
    fn by_code(&self, code: &str) -> Option<Region> {
        BY_CODE.get(code).copied().copied()
    }

    fn by_name(&self, name: &str) -> Option<Region> {
        BY_NAME.get(name).copied().copied()
    }

    fn regions(&self) -> Vec<Region> {
        REGIONS.to_vec()
    }
}
