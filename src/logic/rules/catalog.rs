//! Static advice table, keyed by air quality category and user group.
//!
//! Every (category, group) pair has a row, so lookups are total.

use crate::models::{Category, Priority, Recommendation, RecommendationCategory, UserGroup};

use Priority::{High, Low, Medium};
use RecommendationCategory::{Health, Home, Outdoor, Protection, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub priority: Priority,
    pub category: RecommendationCategory,
    pub title: &'static str,
    pub description: &'static str,
}

impl CatalogEntry {
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation::new(
            self.id,
            self.category,
            self.priority,
            self.title,
            self.description,
        )
    }
}

const fn rec(
    id: &'static str,
    priority: Priority,
    category: RecommendationCategory,
    title: &'static str,
    description: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        id,
        priority,
        category,
        title,
        description,
    }
}

// Tốt

#[rustfmt::skip]
const GOOD_NORMAL: &[CatalogEntry] = &[
    rec("1", Low, Outdoor, "Hoạt động ngoài trời thoải mái", "Chất lượng không khí tốt, phù hợp cho mọi hoạt động ngoài trời"),
    rec("2", Low, Home, "Mở cửa sổ thông gió", "Tận dụng không khí trong lành để thông gió nhà"),
];

#[rustfmt::skip]
const GOOD_SENSITIVE: &[CatalogEntry] = &[
    rec("1", Low, Outdoor, "Có thể hoạt động ngoài trời", "Chất lượng không khí tốt, an toàn cho người nhạy cảm"),
    rec("2", Low, Health, "Theo dõi cơ thể", "Dù không khí tốt, vẫn nên chú ý các triệu chứng"),
];

#[rustfmt::skip]
const GOOD_CHILDREN: &[CatalogEntry] = &[
    rec("1", Low, Outdoor, "Cho trẻ chơi ngoài trời", "Thời điểm tốt để trẻ vận động và vui chơi"),
];

#[rustfmt::skip]
const GOOD_ELDERLY: &[CatalogEntry] = &[
    rec("1", Low, Outdoor, "Đi dạo buổi sáng", "Không khí trong lành, phù hợp tập thể dục nhẹ"),
];

#[rustfmt::skip]
const GOOD_ATHLETE: &[CatalogEntry] = &[
    rec("1", Low, Outdoor, "Tập luyện cường độ cao", "Điều kiện lý tưởng cho tập luyện ngoài trời"),
];

// Trung bình

#[rustfmt::skip]
const MODERATE_NORMAL: &[CatalogEntry] = &[
    rec("1", Low, Outdoor, "Hoạt động ngoài trời bình thường", "Có thể hoạt động ngoài trời, theo dõi chất lượng không khí"),
    rec("2", Medium, Health, "Theo dõi AQI", "Kiểm tra AQI định kỳ trong ngày"),
];

#[rustfmt::skip]
const MODERATE_SENSITIVE: &[CatalogEntry] = &[
    rec("1", Medium, Outdoor, "Hạn chế hoạt động ngoài trời", "Giảm thời gian và cường độ hoạt động ngoài trời"),
    rec("2", Medium, Protection, "Đeo khẩu trang khi ra ngoài", "Sử dụng khẩu trang N95 hoặc tương đương"),
    rec("3", High, Health, "Mang theo thuốc", "Người có bệnh hô hấp nên mang theo thuốc"),
];

#[rustfmt::skip]
const MODERATE_CHILDREN: &[CatalogEntry] = &[
    rec("1", Medium, Outdoor, "Giới hạn thời gian chơi", "Cho trẻ chơi trong nhà nhiều hơn"),
    rec("2", Medium, Outdoor, "Tránh giờ cao điểm", "Không cho trẻ ra ngoài vào giờ giao thông đông"),
];

#[rustfmt::skip]
const MODERATE_ELDERLY: &[CatalogEntry] = &[
    rec("1", Medium, Outdoor, "Hạn chế ra ngoài", "Ở nhà nhiều hơn, tránh hoạt động gắng sức"),
    rec("2", Medium, Health, "Uống nhiều nước", "Giữ cơ thể đủ nước, đặc biệt khi trời nóng"),
];

#[rustfmt::skip]
const MODERATE_ATHLETE: &[CatalogEntry] = &[
    rec("1", Medium, Outdoor, "Tập luyện cường độ vừa", "Giảm cường độ tập luyện ngoài trời"),
    rec("2", Medium, Outdoor, "Chọn thời điểm tập", "Tập vào sáng sớm hoặc tối khi AQI thấp hơn"),
];

// Kém

#[rustfmt::skip]
const UNHEALTHY_NORMAL: &[CatalogEntry] = &[
    rec("1", Medium, Outdoor, "Hạn chế ra ngoài", "Giảm các hoạt động ngoài trời không cần thiết"),
    rec("2", Medium, Protection, "Đeo khẩu trang", "Sử dụng khẩu trang khi phải ra ngoài"),
    rec("3", Medium, Home, "Đóng cửa sổ", "Giữ không khí trong nhà sạch hơn"),
];

#[rustfmt::skip]
const UNHEALTHY_SENSITIVE: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Ở nhà", "Tránh ra ngoài, đóng cửa sổ và cửa ra vào"),
    rec("2", High, Home, "Bật máy lọc không khí", "Sử dụng máy lọc không khí nếu có"),
    rec("3", High, Health, "Theo dõi triệu chứng", "Chú ý ho, khó thở, đau ngực"),
    rec("4", High, Health, "Sẵn sàng thuốc cấp cứu", "Để thuốc hen suyễn, tim mạch trong tầm tay"),
];

#[rustfmt::skip]
const UNHEALTHY_CHILDREN: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Cho trẻ ở trong nhà", "Không cho trẻ ra ngoài chơi"),
    rec("2", High, Health, "Theo dõi sức khỏe trẻ", "Chú ý các dấu hiệu khó thở, ho"),
];

#[rustfmt::skip]
const UNHEALTHY_ELDERLY: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Ở trong nhà hoàn toàn", "Tránh mọi hoạt động ngoài trời"),
    rec("2", High, Health, "Liên lạc người thân", "Thông báo tình trạng sức khỏe cho gia đình"),
];

#[rustfmt::skip]
const UNHEALTHY_ATHLETE: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Tập trong nhà", "Chuyển sang tập luyện trong phòng gym"),
    rec("2", Medium, Health, "Hoãn tập nếu cần", "Nghỉ ngơi nếu cảm thấy khó thở"),
];

// Xấu

#[rustfmt::skip]
const HAZARDOUS_NORMAL: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Ở nhà, đóng cửa", "Hạn chế tối đa ra ngoài, đóng kín cửa"),
    rec("2", High, Protection, "Đeo khẩu trang N95", "Bắt buộc đeo khẩu trang khi ra ngoài"),
    rec("3", High, Home, "Bật máy lọc không khí", "Lọc không khí trong nhà liên tục"),
    rec("4", Medium, Transport, "Sử dụng phương tiện cá nhân", "Tránh đi bộ, đi xe máy nếu phải ra ngoài"),
];

#[rustfmt::skip]
const HAZARDOUS_SENSITIVE: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Ở nhà tuyệt đối", "KHÔNG ra ngoài trong mọi trường hợp"),
    rec("2", High, Home, "Đóng kín cửa", "Đóng tất cả cửa sổ, cửa ra vào, lỗ thông gió"),
    rec("3", High, Home, "Máy lọc không khí tối đa", "Bật máy lọc công suất cao liên tục"),
    rec("4", High, Health, "Sẵn sàng cấp cứu", "Chuẩn bị số điện thoại cấp cứu, thuốc"),
    rec("5", High, Health, "Uống thuốc dự phòng", "Dùng thuốc theo chỉ định bác sĩ"),
];

#[rustfmt::skip]
const HAZARDOUS_CHILDREN: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Giữ trẻ trong nhà", "Tuyệt đối không cho trẻ ra ngoài"),
    rec("2", High, Outdoor, "Nghỉ học nếu cần", "Xem xét cho trẻ nghỉ học"),
    rec("3", High, Health, "Theo dõi liên tục", "Quan sát sức khỏe trẻ thường xuyên"),
];

#[rustfmt::skip]
const HAZARDOUS_ELDERLY: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Cách ly hoàn toàn", "Ở trong phòng kín, tránh mọi tiếp xúc ngoài trời"),
    rec("2", High, Health, "Liên hệ y tế", "Thông báo cho bác sĩ, sẵn sàng cấp cứu"),
    rec("3", High, Health, "Người thân túc trực", "Có người ở cùng để hỗ trợ khi cần"),
];

#[rustfmt::skip]
const HAZARDOUS_ATHLETE: &[CatalogEntry] = &[
    rec("1", High, Outdoor, "Nghỉ tập hoàn toàn", "Không tập luyện trong và ngoài nhà"),
    rec("2", High, Health, "Nghỉ ngơi phục hồi", "Tập trung nghỉ ngơi, uống nhiều nước"),
];

pub fn base_entries(category: Category, group: UserGroup) -> &'static [CatalogEntry] {
    match (category, group) {
        (Category::Good, UserGroup::Normal) => GOOD_NORMAL,
        (Category::Good, UserGroup::Sensitive) => GOOD_SENSITIVE,
        (Category::Good, UserGroup::Children) => GOOD_CHILDREN,
        (Category::Good, UserGroup::Elderly) => GOOD_ELDERLY,
        (Category::Good, UserGroup::Athlete) => GOOD_ATHLETE,
        (Category::Moderate, UserGroup::Normal) => MODERATE_NORMAL,
        (Category::Moderate, UserGroup::Sensitive) => MODERATE_SENSITIVE,
        (Category::Moderate, UserGroup::Children) => MODERATE_CHILDREN,
        (Category::Moderate, UserGroup::Elderly) => MODERATE_ELDERLY,
        (Category::Moderate, UserGroup::Athlete) => MODERATE_ATHLETE,
        (Category::Unhealthy, UserGroup::Normal) => UNHEALTHY_NORMAL,
        (Category::Unhealthy, UserGroup::Sensitive) => UNHEALTHY_SENSITIVE,
        (Category::Unhealthy, UserGroup::Children) => UNHEALTHY_CHILDREN,
        (Category::Unhealthy, UserGroup::Elderly) => UNHEALTHY_ELDERLY,
        (Category::Unhealthy, UserGroup::Athlete) => UNHEALTHY_ATHLETE,
        (Category::Hazardous, UserGroup::Normal) => HAZARDOUS_NORMAL,
        (Category::Hazardous, UserGroup::Sensitive) => HAZARDOUS_SENSITIVE,
        (Category::Hazardous, UserGroup::Children) => HAZARDOUS_CHILDREN,
        (Category::Hazardous, UserGroup::Elderly) => HAZARDOUS_ELDERLY,
        (Category::Hazardous, UserGroup::Athlete) => HAZARDOUS_ATHLETE,
    }
}

pub fn base_recommendations(category: Category, group: UserGroup) -> Vec<Recommendation> {
    base_entries(category, group)
        .iter()
        .map(CatalogEntry::to_recommendation)
        .collect()
}
