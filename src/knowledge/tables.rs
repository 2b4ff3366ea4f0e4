//! Static Ayurvedic reference tables.

use super::Classification;

pub(super) struct ClassificationRow {
    pub classification: Classification,
    pub elements: &'static [&'static str],
    pub qualities: &'static [&'static str],
    pub seasons: &'static [&'static str],
    pub recommended_tastes: &'static [&'static str],
    pub avoid_foods: &'static [&'static str],
    pub imbalance_symptoms: &'static [&'static str],
}

pub(super) struct IngredientRow {
    pub name: &'static str,
    pub sanskrit_name: &'static str,
    /// Effect text per classification, in `Classification::ALL` order.
    pub effects: [&'static str; 3],
    pub benefits: &'static [&'static str],
    pub contraindications: &'static [&'static str],
}

pub(super) struct GoalRow {
    pub key: &'static str,
    pub description: &'static str,
    pub recommended_herbs: &'static [&'static str],
    /// Herb suggestions per classification, in `Classification::ALL` order.
    pub by_classification: [&'static [&'static str]; 3],
    pub lifestyle_tips: &'static [&'static str],
}

pub(super) const CLASSIFICATIONS: &[ClassificationRow] = &[
    ClassificationRow {
        classification: Classification::Vata,
        elements: &["Air", "Space"],
        qualities: &["Dry", "Light", "Cold", "Rough", "Subtle", "Mobile"],
        seasons: &["Fall", "Early Winter"],
        recommended_tastes: &["Sweet", "Sour", "Salty"],
        avoid_foods: &["Cold", "Dry", "Light", "Bitter", "Pungent", "Astringent"],
        imbalance_symptoms: &["Anxiety", "Dry skin", "Constipation", "Insomnia"],
    },
    ClassificationRow {
        classification: Classification::Pitta,
        elements: &["Fire", "Water"],
        qualities: &["Hot", "Sharp", "Light", "Liquid", "Spreading", "Oily"],
        seasons: &["Summer", "Late Spring"],
        recommended_tastes: &["Sweet", "Bitter", "Astringent"],
        avoid_foods: &["Spicy", "Hot", "Sour", "Salty", "Pungent"],
        imbalance_symptoms: &["Irritability", "Inflammation", "Acid reflux", "Skin rashes"],
    },
    ClassificationRow {
        classification: Classification::Kapha,
        elements: &["Earth", "Water"],
        qualities: &["Heavy", "Slow", "Cool", "Oily", "Smooth", "Dense", "Stable"],
        seasons: &["Spring", "Late Winter"],
        recommended_tastes: &["Pungent", "Bitter", "Astringent"],
        avoid_foods: &["Heavy", "Oily", "Cold", "Sweet", "Sour", "Salty"],
        imbalance_symptoms: &["Lethargy", "Weight gain", "Congestion", "Depression"],
    },
];

pub(super) const INGREDIENTS: &[IngredientRow] = &[
    IngredientRow {
        name: "Ashwagandha",
        sanskrit_name: "Withania somnifera",
        effects: ["balances", "may increase (in excess)", "balances"],
        benefits: &[
            "Stress relief",
            "Strength and vitality",
            "Immunity boost",
            "Cognitive function",
            "Sleep quality",
            "Adaptogenic properties",
        ],
        contraindications: &["Pregnancy", "Hyperthyroidism", "Auto-immune conditions"],
    },
    IngredientRow {
        name: "Turmeric",
        sanskrit_name: "Curcuma longa",
        effects: ["balances (in moderation)", "may increase (in excess)", "balances"],
        benefits: &[
            "Anti-inflammatory",
            "Immunity boost",
            "Skin health",
            "Liver support",
            "Antioxidant",
            "Joint health",
        ],
        contraindications: &["Gallstones", "Blood thinning medications"],
    },
    IngredientRow {
        name: "Triphala",
        sanskrit_name: "Three fruits (Amalaki, Bibhitaki, Haritaki)",
        effects: ["balances", "balances", "balances"],
        benefits: &[
            "Digestive health",
            "Detoxification",
            "Eye health",
            "Immune support",
            "Regular elimination",
            "Antioxidant",
        ],
        contraindications: &["Diarrhea", "Pregnancy", "Severe dehydration"],
    },
    IngredientRow {
        name: "Brahmi",
        sanskrit_name: "Bacopa monnieri",
        effects: ["balances", "balances", "may increase (in excess)"],
        benefits: &[
            "Memory enhancement",
            "Cognitive function",
            "Stress relief",
            "Mental clarity",
            "Anxiety reduction",
            "Sleep quality",
        ],
        contraindications: &["Hypothyroidism (high doses)"],
    },
    IngredientRow {
        name: "Tulsi",
        sanskrit_name: "Ocimum sanctum",
        effects: ["balances", "may increase", "balances"],
        benefits: &[
            "Immunity boost",
            "Respiratory health",
            "Stress relief",
            "Adaptogenic",
            "Anti-microbial",
            "Heart health",
        ],
        contraindications: &["Pregnancy (high doses)", "Blood thinning medications"],
    },
    IngredientRow {
        name: "Shatavari",
        sanskrit_name: "Asparagus racemosus",
        effects: ["balances", "balances", "may increase"],
        benefits: &[
            "Female reproductive health",
            "Hormonal balance",
            "Digestive support",
            "Immune boost",
            "Lactation support",
            "Cooling effect",
        ],
        contraindications: &["Estrogen-sensitive conditions"],
    },
    IngredientRow {
        name: "Ginger",
        sanskrit_name: "Zingiber officinale",
        effects: ["balances", "may increase", "balances"],
        benefits: &[
            "Digestive fire (Agni)",
            "Nausea relief",
            "Anti-inflammatory",
            "Respiratory health",
            "Circulation",
            "Pain relief",
        ],
        contraindications: &["Ulcers", "High Pitta conditions"],
    },
];

pub(super) const GOALS: &[GoalRow] = &[
    GoalRow {
        key: "immunity",
        description: "Boost immune system and overall vitality",
        recommended_herbs: &["Ashwagandha", "Turmeric", "Tulsi", "Amalaki", "Guduchi"],
        by_classification: [
            &["Ashwagandha", "Shatavari", "Amalaki"],
            &["Amalaki", "Guduchi", "Neem"],
            &["Turmeric", "Tulsi", "Trikatu"],
        ],
        lifestyle_tips: &[
            "Regular sleep schedule",
            "Adequate hydration",
            "Balanced diet",
            "Moderate exercise",
        ],
    },
    GoalRow {
        key: "digestion",
        description: "Improve digestive health and metabolism",
        recommended_herbs: &["Triphala", "Ginger", "Fennel", "Cumin", "Hingvastak"],
        by_classification: [
            &["Ginger", "Asafoetida", "Ajwain"],
            &["Coriander", "Fennel", "Mint"],
            &["Black Pepper", "Trikatu", "Ginger"],
        ],
        lifestyle_tips: &[
            "Eat at regular times",
            "Avoid overeating",
            "Include all six tastes",
            "Walk after meals",
        ],
    },
    GoalRow {
        key: "stress_relief",
        description: "Reduce stress and promote mental calm",
        recommended_herbs: &["Ashwagandha", "Brahmi", "Jatamansi", "Shankhpushpi"],
        by_classification: [
            &["Ashwagandha", "Brahmi", "Tagara"],
            &["Brahmi", "Jatamansi", "Shatavari"],
            &["Brahmi", "Tulsi", "Guggulu"],
        ],
        lifestyle_tips: &[
            "Regular meditation",
            "Yoga practice",
            "Adequate sleep",
            "Reduce stimulants",
        ],
    },
    GoalRow {
        key: "sleep",
        description: "Improve sleep quality and duration",
        recommended_herbs: &["Ashwagandha", "Brahmi", "Jatamansi", "Tagara"],
        by_classification: [
            &["Ashwagandha", "Tagara", "Warm milk with nutmeg"],
            &["Brahmi", "Shatavari", "Cool milk"],
            &["Trikatu", "Brahmi", "Light evening meal"],
        ],
        lifestyle_tips: &[
            "Regular sleep schedule",
            "Avoid screens before bed",
            "Light evening meals",
            "Oil massage (Abhyanga)",
        ],
    },
    GoalRow {
        key: "skin_health",
        description: "Promote healthy, glowing skin",
        recommended_herbs: &["Turmeric", "Neem", "Manjistha", "Aloe Vera"],
        by_classification: [
            &["Ashwagandha", "Shatavari", "Sesame oil"],
            &["Neem", "Manjistha", "Coconut oil"],
            &["Turmeric", "Neem", "Light oils"],
        ],
        lifestyle_tips: &[
            "Adequate hydration",
            "Balanced diet",
            "Regular cleansing",
            "Sun protection",
        ],
    },
    GoalRow {
        key: "joint_health",
        description: "Support joint flexibility and reduce inflammation",
        recommended_herbs: &["Turmeric", "Guggulu", "Ashwagandha", "Shallaki"],
        by_classification: [
            &["Ashwagandha", "Guggulu", "Warm oil massage"],
            &["Turmeric", "Guduchi", "Cool applications"],
            &["Guggulu", "Trikatu", "Dry heat"],
        ],
        lifestyle_tips: &[
            "Regular gentle exercise",
            "Yoga and stretching",
            "Maintain healthy weight",
            "Anti-inflammatory diet",
        ],
    },
];
