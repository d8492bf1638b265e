//! Static catalog of JMA forecast areas grouped by region.

use crate::types::AreaCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub code: &'static str,
    pub name: &'static str,
}

impl Area {
    pub fn area_code(&self) -> AreaCode {
        AreaCode::new(self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub label: &'static str,
    pub areas: &'static [Area],
}

const fn area(code: &'static str, name: &'static str) -> Area {
    Area { code, name }
}

static REGIONS: &[Region] = &[
    Region {
        label: "北海道地方",
        areas: &[area("016000", "札幌")],
    },
    Region {
        label: "東北地方",
        areas: &[
            area("020000", "青森"),
            area("030000", "岩手"),
            area("040000", "宮城"),
            area("050000", "秋田"),
            area("060000", "山形"),
            area("070000", "福島"),
        ],
    },
    Region {
        label: "関東甲信地方",
        areas: &[
            area("080000", "茨城"),
            area("090000", "栃木"),
            area("100000", "群馬"),
            area("110000", "埼玉"),
            area("120000", "千葉"),
            area("130000", "東京"),
            area("140000", "神奈川"),
            area("190000", "山梨"),
            area("200000", "長野"),
        ],
    },
    Region {
        label: "北陸・東海地方",
        areas: &[
            area("150000", "新潟"),
            area("160000", "富山"),
            area("170000", "石川"),
            area("180000", "福井"),
            area("210000", "岐阜"),
            area("220000", "静岡"),
            area("230000", "愛知"),
            area("240000", "三重"),
        ],
    },
    Region {
        label: "近畿地方",
        areas: &[
            area("250000", "滋賀"),
            area("260000", "京都"),
            area("270000", "大阪"),
            area("280000", "兵庫"),
            area("290000", "奈良"),
            area("300000", "和歌山"),
        ],
    },
    Region {
        label: "中国・四国地方",
        areas: &[
            area("310000", "鳥取"),
            area("320000", "島根"),
            area("330000", "岡山"),
            area("340000", "広島"),
            area("350000", "山口"),
            area("360000", "徳島"),
            area("370000", "香川"),
            area("380000", "愛媛"),
            area("390000", "高知"),
        ],
    },
    Region {
        label: "九州・沖縄地方",
        areas: &[
            area("400000", "福岡"),
            area("410000", "佐賀"),
            area("420000", "長崎"),
            area("430000", "熊本"),
            area("440000", "大分"),
            area("450000", "宮崎"),
            area("460100", "鹿児島"),
            area("471000", "沖縄"),
        ],
    },
];

/// All regions in display order.
pub fn list_regions() -> &'static [Region] {
    REGIONS
}

/// Every area, flattened in catalog order.
pub fn all_areas() -> impl Iterator<Item = &'static Area> {
    REGIONS.iter().flat_map(|region| region.areas.iter())
}

/// Look up an area and the region it belongs to.
pub fn find_area(code: &str) -> Option<(&'static Region, &'static Area)> {
    REGIONS.iter().find_map(|region| {
        region
            .areas
            .iter()
            .find(|area| area.code == code)
            .map(|area| (region, area))
    })
}
