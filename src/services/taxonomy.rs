/// Category name → keyword list table
pub type Taxonomy = &'static [(&'static str, &'static [&'static str])];

/// Category → synonym keywords used to detect intent in free text.
///
/// Keys are category names as they appear on templates; keywords are lower case
/// and compared as plain substrings of the case-folded query.
pub const CATEGORY_KEYWORDS: Taxonomy = &[
    (
        "eCommerce",
        &[
            "shop", "store", "sell", "product", "cart", "checkout", "ecommerce",
            "e-commerce", "merchandise", "retail", "boutique", "woocommerce",
        ],
    ),
    (
        "Restaurant",
        &[
            "restaurant", "cafe", "coffee", "food", "menu", "bakery", "pub", "bistro",
            "pizza", "dining", "catering", "chef",
        ],
    ),
    (
        "Business",
        &[
            "business", "company", "corporate", "startup", "consulting", "firm",
            "enterprise", "services", "finance",
        ],
    ),
    (
        "Portfolio",
        &[
            "portfolio", "showcase", "designer", "artist", "creative", "resume", "cv",
            "freelance",
        ],
    ),
    (
        "Blog",
        &["blog", "magazine", "news", "article", "writer", "journal", "podcast"],
    ),
    (
        "Education",
        &[
            "school", "course", "education", "learning", "university", "teacher",
            "student", "academy", "tutor",
        ],
    ),
    (
        "Health",
        &[
            "health", "medical", "clinic", "doctor", "dentist", "hospital", "wellness",
            "therapy", "massage",
        ],
    ),
    (
        "Fitness",
        &["fitness", "gym", "yoga", "workout", "trainer", "sport", "crossfit"],
    ),
    (
        "Real Estate",
        &[
            "real estate", "property", "apartment", "realtor", "house", "rental",
            "listing", "mortgage",
        ],
    ),
    (
        "Travel",
        &[
            "travel", "tour", "hotel", "booking", "trip", "vacation", "resort", "hostel",
        ],
    ),
    (
        "Photography",
        &["photo", "photographer", "photography", "gallery", "wedding", "camera"],
    ),
    (
        "Agency",
        &["agency", "marketing", "digital", "seo", "advertising", "studio"],
    ),
    (
        "Nonprofit",
        &["charity", "nonprofit", "non-profit", "donation", "volunteer", "church", "ngo"],
    ),
    (
        "Events",
        &["events", "conference", "meetup", "festival", "concert", "party", "ticket"],
    ),
    (
        "Technology",
        &["mobile app", "saas", "software", "tech", "cloud", "hosting", "landing"],
    ),
];

/// Keywords registered in `taxonomy` under `category`, matched case-insensitively.
///
/// Every entry whose name matches contributes. Unknown or blank categories have no
/// keywords, and blank keywords are skipped.
pub fn keywords_for(taxonomy: Taxonomy, category: &str) -> impl Iterator<Item = &'static str> {
    let category = category.trim().to_lowercase();

    taxonomy
        .iter()
        .filter(move |(name, _)| !category.is_empty() && name.to_lowercase() == category)
        .flat_map(|(_, keywords)| keywords.iter().copied())
        .filter(|keyword| !keyword.trim().is_empty())
}
