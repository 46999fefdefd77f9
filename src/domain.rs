// Static category domains and the coarse-category tables of the trained feature space.

pub const TOWN_REGIONS: &[(&str, &str)] = &[
    ("ANG MO KIO", "Central"),
    ("BEDOK", "East"),
    ("BISHAN", "Central"),
    ("BUKIT BATOK", "West"),
    ("BUKIT MERAH", "Central"),
    ("BUKIT TIMAH", "Central"),
    ("CENTRAL AREA", "Central"),
    ("CHOA CHU KANG", "West"),
    ("CLEMENTI", "West"),
    ("GEYLANG", "East"),
    ("HOUGANG", "North-East"),
    ("JURONG EAST", "West"),
    ("JURONG WEST", "West"),
    ("KALLANG/WHAMPOA", "Central"),
    ("MARINE PARADE", "East"),
    ("PASIR RIS", "East"),
    ("PUNGGOL", "North-East"),
    ("QUEENSTOWN", "Central"),
    ("SEMBAWANG", "North"),
    ("SENGKANG", "North-East"),
    ("SERANGOON", "North-East"),
    ("TAMPINES", "East"),
    ("TOA PAYOH", "Central"),
    ("WOODLANDS", "North"),
    ("YISHUN", "North"),
];

pub const FLAT_MODEL_CATEGORIES: &[(&str, &str)] = &[
    ("IMPROVED", "Smaller Flats"),
    ("NEW GENERATION", "Smaller Flats"),
    ("STANDARD", "Smaller Flats"),
    ("MODEL A", "Smaller Flats"),
    ("SIMPLIFIED", "Smaller Flats"),
    ("MODEL A-MAISONETTE", "Maisonettes"),
    ("MAISONETTE", "Maisonettes"),
    ("IMPROVED-MAISONETTE", "Maisonettes"),
    ("APARTMENT", "Larger Flats"),
    ("TERRACE", "Larger Flats"),
    ("PREMIUM APARTMENT", "Larger Flats"),
    ("2-ROOM", "Special Models"),
    ("MULTI GENERATION", "Special Models"),
];

pub const TOWNS: &[&str] = &[
    "ANG MO KIO",
    "BEDOK",
    "BISHAN",
    "BUKIT BATOK",
    "BUKIT MERAH",
    "BUKIT TIMAH",
    "CENTRAL AREA",
    "CHOA CHU KANG",
    "CLEMENTI",
    "GEYLANG",
    "HOUGANG",
    "JURONG EAST",
    "JURONG WEST",
    "KALLANG/WHAMPOA",
    "MARINE PARADE",
    "PASIR RIS",
    "PUNGGOL",
    "QUEENSTOWN",
    "SEMBAWANG",
    "SENGKANG",
    "SERANGOON",
    "TAMPINES",
    "TOA PAYOH",
    "WOODLANDS",
    "YISHUN",
];

pub const FLAT_TYPES: &[&str] = &[
    "1 ROOM",
    "2 ROOM",
    "3 ROOM",
    "4 ROOM",
    "5 ROOM",
    "EXECUTIVE",
    "MULTI GENERATION",
];

pub const FLAT_MODELS: &[&str] = &[
    "IMPROVED",
    "NEW GENERATION",
    "STANDARD",
    "MODEL A",
    "SIMPLIFIED",
    "MODEL A-MAISONETTE",
    "MAISONETTE",
    "IMPROVED-MAISONETTE",
    "APARTMENT",
    "TERRACE",
    "PREMIUM APARTMENT",
    "2-ROOM",
    "MULTI GENERATION",
];

pub const STOREY_CATEGORIES: &[&str] = &["Low Storey", "Mid Storey", "High Storey"];

pub const REGIONS: &[&str] = &["Central", "East", "North", "North-East", "West"];

pub const MODEL_CATEGORIES: &[&str] = &[
    "Larger Flats",
    "Maisonettes",
    "Smaller Flats",
    "Special Models",
];

/// Lease term every HDB flat starts with; lease age is measured against it.
pub const FULL_LEASE_YEARS: u32 = 99;
