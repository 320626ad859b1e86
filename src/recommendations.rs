//! Rule-based reduction advice.
//!
//! Categories are ranked by their share of the footprint and only the two
//! largest get advice. Each category owns a list of rule chains; within a
//! chain the first rule whose guard holds fires and the rest are skipped
//! (an if / else-if ladder). Guards encode "don't recommend what the user
//! already does".

use crate::models::{AcUsage, Category, EmissionBreakdown, LifestyleInput, Suggestion, TransportMode};

/// Upper bound on returned suggestions, offset included.
pub const MAX_SUGGESTIONS: usize = 5;

/// kg CO2 a planted tree is credited with per month.
pub const KG_PER_TREE: f64 = 25.0;

/// Number of top-ranked categories that receive advice.
const ADVISED_CATEGORIES: usize = 2;

struct Rule {
    applies: fn(&LifestyleInput) -> bool,
    advice: &'static str,
}

/// Alternatives evaluated in order; at most one fires.
type RuleChain = &'static [Rule];

const TRANSPORTATION_RULES: &[RuleChain] = &[
    &[
        Rule {
            applies: |i| i.transport_mode == TransportMode::Car && !i.carpool,
            advice: "🚗 TOP PRIORITY: Carpooling can cut your transport emissions in half!",
        },
        Rule {
            applies: |i| i.transport_mode == TransportMode::Car,
            advice: "🚌 Consider using public transport 2-3 times per week to reduce emissions by up to 40%",
        },
    ],
    &[Rule {
        applies: |i| !i.transport_mode.is_active() && i.travel_km_per_day < 10.0,
        advice: "🚴 Try cycling or walking for short distances under 10km",
    }],
];

const ELECTRICITY_RULES: &[RuleChain] = &[
    &[Rule {
        applies: |i| !i.renewable_energy,
        advice: "⚡ TOP PRIORITY: Switch to renewable energy plans to reduce electricity emissions by 30%",
    }],
    &[
        Rule {
            applies: |i| i.ac_usage == AcUsage::Daily,
            advice: "❄️ Use AC efficiently: set to 24°C and use fans to save 20-30% energy",
        },
        Rule {
            applies: |i| i.ac_usage == AcUsage::Occasionally && i.electricity_units > 400.0,
            advice: "💡 Replace old appliances with energy-efficient models to save up to 40% energy",
        },
    ],
    &[Rule {
        applies: |i| i.electricity_units > 500.0,
        advice: "🔌 Unplug devices when not in use - phantom load accounts for 10% of home energy",
    }],
];

const DIET_RULES: &[RuleChain] = &[
    &[
        Rule {
            applies: |i| i.meat_meals_per_week > 10.0,
            advice: "🌱 TOP PRIORITY: Try Meatless Mondays - reducing meat by just 2 meals/week saves ~30kg CO2/month",
        },
        Rule {
            applies: |i| i.meat_meals_per_week > 5.0,
            advice: "🥗 Great job on reducing meat! Try one more plant-based day per week",
        },
    ],
    &[Rule {
        applies: |i| !i.local_food,
        advice: "🥬 Choose local, seasonal produce to reduce food transportation emissions by 15%",
    }],
    &[Rule {
        applies: |i| i.dairy_liters_per_day > 1.5,
        advice: "🥛 Consider plant-based milk alternatives to reduce dairy emissions",
    }],
];

const WASTE_RULES: &[RuleChain] = &[
    &[Rule {
        applies: |i| !i.recycle,
        advice: "♻️ TOP PRIORITY: Start recycling! It can reduce waste emissions by 30%",
    }],
    &[
        Rule {
            applies: |i| i.waste_kg_per_week > 20.0,
            advice: "🗑️ Reduce single-use plastics and start composting to cut waste by 50%",
        },
        Rule {
            applies: |i| i.waste_kg_per_week > 15.0 && i.recycle,
            advice: "🍂 Compost food waste to further reduce landfill emissions",
        },
    ],
    &[Rule {
        applies: |i| i.water_usage_liters > 300.0,
        advice: "💧 Install low-flow fixtures to reduce water usage by 30%",
    }],
];

const LIFESTYLE_RULES: &[RuleChain] = &[
    &[Rule {
        applies: |i| i.online_orders > 15.0,
        advice: "📦 TOP PRIORITY: Bundle online orders to reduce delivery emissions by 40%",
    }],
    &[
        Rule {
            applies: |i| i.shopping_freq > 10.0,
            advice: "👕 Buy quality over quantity - fast fashion contributes 10% of global emissions",
        },
        Rule {
            applies: |i| i.shopping_freq > 5.0,
            advice: "🛍️ Consider second-hand shopping for clothes and furniture",
        },
    ],
];

fn rules_for(category: Category) -> &'static [RuleChain] {
    match category {
        Category::Transportation => TRANSPORTATION_RULES,
        Category::Electricity => ELECTRICITY_RULES,
        Category::Diet => DIET_RULES,
        Category::Waste => WASTE_RULES,
        Category::Lifestyle => LIFESTYLE_RULES,
    }
}

/// Categories ordered by descending emissions. Ties keep the fixed
/// precedence of `Category::ALL` because the sort is stable.
pub fn rank_categories(breakdown: &EmissionBreakdown) -> Vec<Category> {
    let mut ranked = Category::ALL.to_vec();
    ranked.sort_by(|a, b| breakdown.get(*b).total_cmp(&breakdown.get(*a)));
    ranked
}

/// Advice fired for one category, in rule order.
pub fn category_advice(category: Category, input: &LifestyleInput) -> Vec<Suggestion> {
    rules_for(category)
        .iter()
        .filter_map(|chain| chain.iter().find(|rule| (rule.applies)(input)))
        .map(|rule| Suggestion::new(rule.advice))
        .collect()
}

/// Trees needed to offset a monthly total.
pub fn trees_to_offset(total: f64) -> u64 {
    (total.max(0.0) / KG_PER_TREE).ceil() as u64
}

pub fn offset_suggestion(total: f64) -> Suggestion {
    Suggestion::new(format!(
        "🌳 Plant {} trees this month to offset your carbon footprint",
        trees_to_offset(total)
    ))
}

/// Builds the prioritized suggestion list for a breakdown.
///
/// Advice for the two largest categories comes first, de-duplicated in
/// first-seen order, and the tree offset always closes the list. The list
/// holds at least the offset and never more than `MAX_SUGGESTIONS`.
pub fn generate(breakdown: &EmissionBreakdown, input: &LifestyleInput) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = Vec::with_capacity(MAX_SUGGESTIONS);

    let fired = rank_categories(breakdown)
        .into_iter()
        .take(ADVISED_CATEGORIES)
        .flat_map(|category| category_advice(category, input));

    for advice in fired {
        if suggestions.len() == MAX_SUGGESTIONS - 1 {
            break;
        }
        if !suggestions.contains(&advice) {
            suggestions.push(advice);
        }
    }

    suggestions.push(offset_suggestion(breakdown.total));
    suggestions
}
