use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    Central,
    South,
    Global,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "north",
            Region::Central => "central",
            Region::South => "south",
            Region::Global => "global",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "north" | "mien bac" | "miền bắc" => Some(Region::North),
            "central" | "mien trung" | "miền trung" => Some(Region::Central),
            "south" | "mien nam" | "miền nam" => Some(Region::South),
            "global" | "world" => Some(Region::Global),
            _ => None,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typical pollution of a global reference city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollutionProfile {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Station {
    pub id: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Region,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollution: Option<PollutionProfile>,
}

const fn vn(id: &'static str, name: &'static str, lat: f64, lng: f64, region: Region) -> Station {
    Station {
        id,
        name,
        latitude: lat,
        longitude: lng,
        region,
        pollution: None,
    }
}

const fn global(
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    pollution: PollutionProfile,
) -> Station {
    Station {
        id,
        name,
        latitude: lat,
        longitude: lng,
        region: Region::Global,
        pollution: Some(pollution),
    }
}

pub const VIETNAM_STATIONS: &[Station] = &[
    vn("HN-01", "Hà Nội - Hoàn Kiếm", 21.0285, 105.8542, Region::North),
    vn("HN-02", "Hà Nội - Cầu Giấy", 21.0333, 105.7942, Region::North),
    vn("HN-03", "Hà Nội - Long Biên", 21.0479, 105.8925, Region::North),
    vn("HP-01", "Hải Phòng", 20.8449, 106.6881, Region::North),
    vn("QN-01", "Quảng Ninh - Hạ Long", 20.9513, 107.0804, Region::North),
    vn("BG-01", "Bắc Giang", 21.281, 106.197, Region::North),
    vn("BN-01", "Bắc Ninh", 21.1861, 106.0763, Region::North),
    vn("TB-01", "Thái Bình", 20.4463, 106.3366, Region::North),
    vn("ND-01", "Nam Định", 20.4388, 106.1621, Region::North),
    vn("LC-01", "Lào Cai", 22.4856, 103.9707, Region::North),
    vn("TH-01", "Thanh Hóa", 19.8075, 105.7764, Region::Central),
    vn("NA-01", "Vinh - Nghệ An", 18.6796, 105.6813, Region::Central),
    vn("HT-01", "Hà Tĩnh", 18.3559, 105.8877, Region::Central),
    vn("QB-01", "Đồng Hới - Quảng Bình", 17.4689, 106.6223, Region::Central),
    vn("HU-01", "Huế", 16.4637, 107.5909, Region::Central),
    vn("DN-01", "Đà Nẵng - Hải Châu", 16.0544, 108.2022, Region::Central),
    vn("QN-02", "Quảng Nam - Tam Kỳ", 15.5736, 108.474, Region::Central),
    vn("QN-03", "Quảng Ngãi", 15.12, 108.7923, Region::Central),
    vn("BD-01", "Bình Định - Quy Nhơn", 13.7829, 109.219, Region::Central),
    vn("KH-01", "Nha Trang - Khánh Hòa", 12.2388, 109.1967, Region::Central),
    vn("HCM-01", "TP.HCM - Quận 1", 10.7769, 106.7009, Region::South),
    vn("HCM-02", "TP.HCM - Quận 3", 10.7845, 106.6889, Region::South),
    vn("HCM-03", "TP.HCM - Tân Bình", 10.8006, 106.653, Region::South),
    vn("BD-02", "Bình Dương - Thủ Dầu Một", 10.9804, 106.6519, Region::South),
    vn("DNA-01", "Biên Hòa - Đồng Nai", 10.9447, 106.8243, Region::South),
    vn("VT-01", "Vũng Tàu", 10.3459, 107.0843, Region::South),
    vn("LA-01", "Tân An - Long An", 10.535, 106.413, Region::South),
    vn("CT-01", "Cần Thơ", 10.0452, 105.7469, Region::South),
    vn("AG-01", "Long Xuyên - An Giang", 10.3864, 105.4352, Region::South),
    vn("KG-01", "Rạch Giá - Kiên Giang", 10.0124, 105.0809, Region::South),
    vn("CM-01", "Cà Mau", 9.1769, 105.1524, Region::South),
];

pub const GLOBAL_STATIONS: &[Station] = &[
    global("CN-BJ", "Beijing, China", 39.9042, 116.4074, PollutionProfile::High),
    global("IN-DL", "Delhi, India", 28.6139, 77.2090, PollutionProfile::High),
    global("PK-LH", "Lahore, Pakistan", 31.5497, 74.3436, PollutionProfile::High),
    global("BD-DH", "Dhaka, Bangladesh", 23.8103, 90.4125, PollutionProfile::High),
    global("IR-TH", "Tehran, Iran", 35.6892, 51.3890, PollutionProfile::High),
    global("NZ-AK", "Auckland, New Zealand", -36.8485, 174.7633, PollutionProfile::Low),
    global("CA-VAN", "Vancouver, Canada", 49.2827, -123.1207, PollutionProfile::Low),
    global("FI-HL", "Helsinki, Finland", 60.1699, 24.9384, PollutionProfile::Low),
    global("IS-RE", "Reykjavik, Iceland", 64.1355, -21.8954, PollutionProfile::Low),
    global("AU-CL", "Canberra, Australia", -35.2809, 149.1300, PollutionProfile::Low),
];

/// A city with a public WAQI feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaqiCity {
    pub feed_id: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub const WAQI_CITIES: &[WaqiCity] = &[
    WaqiCity { feed_id: "hanoi", name: "Hanoi", latitude: 21.0285, longitude: 105.8542 },
    WaqiCity { feed_id: "hochiminh", name: "Ho Chi Minh", latitude: 10.8231, longitude: 106.6297 },
    WaqiCity { feed_id: "danang", name: "Da Nang", latitude: 16.0544, longitude: 108.2022 },
    WaqiCity { feed_id: "cantho", name: "Can Tho", latitude: 10.0452, longitude: 105.7469 },
    WaqiCity { feed_id: "haiphong", name: "Hai Phong", latitude: 20.8449, longitude: 106.6881 },
    WaqiCity { feed_id: "nhatrang", name: "Nha Trang", latitude: 12.2388, longitude: 109.1967 },
    WaqiCity { feed_id: "dalat", name: "Da Lat", latitude: 11.9404, longitude: 108.4583 },
    WaqiCity { feed_id: "vungtau", name: "Vung Tau", latitude: 10.3459, longitude: 107.0843 },
];

pub fn all_stations() -> impl Iterator<Item = &'static Station> {
    VIETNAM_STATIONS.iter().chain(GLOBAL_STATIONS.iter())
}

pub fn stations_in(region: Region) -> Vec<&'static Station> {
    all_stations().filter(|s| s.region == region).collect()
}

/// Looks a station up by id or name. An exact id match wins over substring
/// matches; otherwise the first station whose id or name contains the query
/// (case-insensitive) is returned.
pub fn find_station(query: &str) -> Option<&'static Station> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    all_stations()
        .find(|s| s.id.to_lowercase() == query)
        .or_else(|| {
            all_stations().find(|s| {
                s.name.to_lowercase().contains(&query) || s.id.to_lowercase().contains(&query)
            })
        })
}

pub fn search_stations(query: &str) -> Vec<&'static Station> {
    let query = query.trim().to_lowercase();
    all_stations()
        .filter(|s| s.name.to_lowercase().contains(&query) || s.id.to_lowercase().contains(&query))
        .collect()
}

/// A place to assess: either a catalog station or an arbitrary coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
}

impl Location {
    pub fn custom(latitude: f64, longitude: f64) -> Self {
        Self {
            name: format!("Vị trí tùy chọn ({:.4}, {:.4})", latitude, longitude),
            latitude,
            longitude,
            station_id: None,
        }
    }
}

impl From<&Station> for Location {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name.to_string(),
            latitude: station.latitude,
            longitude: station.longitude,
            station_id: Some(station.id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes() {
        assert_eq!(VIETNAM_STATIONS.len(), 31);
        assert_eq!(GLOBAL_STATIONS.len(), 10);
        assert_eq!(WAQI_CITIES.len(), 8);
        assert_eq!(stations_in(Region::North).len(), 10);
        assert_eq!(stations_in(Region::Central).len(), 10);
        assert_eq!(stations_in(Region::South).len(), 11);
    }

    #[test]
    fn station_ids_are_unique() {
        let mut ids: Vec<&str> = all_stations().map(|s| s.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn find_station_prefers_exact_id() {
        // Three Hanoi ids contain "HN-0"; catalog order decides.
        assert_eq!(find_station("qn-01").map(|s| s.id), Some("QN-01"));
        assert_eq!(find_station("HN-0").map(|s| s.id), Some("HN-01"));
    }

    #[test]
    fn find_station_by_name() {
        assert_eq!(find_station("cần thơ").map(|s| s.id), Some("CT-01"));
        assert_eq!(find_station("Delhi").map(|s| s.id), Some("IN-DL"));
        assert!(find_station("atlantis").is_none());
        assert!(find_station("   ").is_none());
    }

    #[test]
    fn search_returns_all_matches() {
        let hcm = search_stations("tp.hcm");
        assert_eq!(hcm.len(), 3);
    }

    #[test]
    fn location_from_station_and_custom() {
        let station = find_station("DN-01").unwrap();
        let location = Location::from(station);
        assert_eq!(location.station_id.as_deref(), Some("DN-01"));
        assert_eq!(location.latitude, 16.0544);

        let custom = Location::custom(21.0, 105.5);
        assert!(custom.name.contains("21.0000"));
        assert!(custom.station_id.is_none());
    }
}
