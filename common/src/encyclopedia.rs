//! 成分事典
//!
//! 代表的な食品添加物・原材料の説明と健康上の注意を静的テーブルで持つ。
//! - search: 名前・説明の部分一致検索
//! - lookup: 名前の完全一致（大文字小文字を区別しない）
//! - describe: スキャン結果の成分に添える一行説明

use serde::Serialize;

/// 事典エントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncyclopediaEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub health: &'static str,
}

const fn entry(name: &'static str, description: &'static str, health: &'static str) -> EncyclopediaEntry {
    EncyclopediaEntry { name, description, health }
}

/// 成分事典
pub const ENTRIES: &[EncyclopediaEntry] = &[
    entry("Sugar",
        "A sweet crystalline substance obtained from various plants, used as a sweetener in food.",
        "Excess sugar can contribute to obesity, diabetes, and tooth decay."),
    entry("Palm Oil",
        "Edible vegetable oil derived from the fruit of oil palms.",
        "High in saturated fats. Can raise cholesterol. Some environmental concerns, check for RSPO certification."),
    entry("Monosodium Glutamate (MSG)",
        "Flavor enhancer often added to savory foods.",
        "Generally recognized as safe in small amounts; some people may experience headaches or allergic reactions."),
    entry("Soy Lecithin",
        "A natural emulsifier derived from soybeans, used to stabilize foods like chocolate and dressings.",
        "Safe for most people; those with soy allergies should avoid."),
    entry("High-Fructose Corn Syrup",
        "A sweetener made from corn starch that has been processed to convert some of its glucose into fructose.",
        "May contribute to obesity and metabolic disorders when consumed in excess."),
    entry("Sodium Nitrite",
        "An additive used to preserve color and prevent bacterial growth in processed meats.",
        "Can form carcinogenic compounds when heated; limit intake."),
    entry("Aspartame",
        "An artificial non-saccharide sweetener used as a sugar substitute in food and beverages.",
        "Safe for most people in moderation; those with phenylketonuria (PKU) should avoid it."),
    entry("Guar Gum",
        "A fiber from the seed of the guar plant, used as a thickener in foods.",
        "Generally safe but can cause digestive upset in large quantities."),
    entry("Potassium Sorbate",
        "A preservative used to inhibit molds and yeasts in foods like cheese and baked goods.",
        "Considered safe; rarely causes allergic reactions."),
    entry("Carrageenan",
        "A thickening agent extracted from red seaweed, commonly used in dairy and meat products.",
        "Safe for most, but some people report digestive issues."),
    entry("Gelatin",
        "A protein obtained by boiling skin, tendons, ligaments, and bones with water. Used as a gelling agent.",
        "Not suitable for vegetarians/vegans; generally recognized as safe."),
    entry("Citric Acid",
        "A weak organic acid found in citrus fruits, used as a preservative and flavor enhancer.",
        "Generally recognized as safe; overconsumption may cause digestive upset in sensitive individuals."),
    entry("BHA (Butylated Hydroxyanisole)",
        "A synthetic antioxidant used to prevent fats from becoming rancid in processed foods.",
        "Potential carcinogen in high doses; regulated and generally considered safe at approved levels."),
    entry("Xanthan Gum",
        "A polysaccharide used as a food thickening and stabilizing agent.",
        "Safe for most, but may cause intestinal gas or bloating in large amounts."),
    entry("Casein",
        "A family of related phosphoproteins commonly found in mammalian milk, used as a food additive.",
        "Safe for most; avoid if lactose intolerant or allergic to milk."),
    entry("Maltodextrin",
        "A polysaccharide used as a food additive for thickening or as a filler.",
        "Generally recognized as safe, but can impact blood sugar levels."),
    entry("Artificial Sweeteners",
        "Chemicals used to replace sugar in food; may confuse the body's sugar response and alter gut bacteria over time.",
        "Diabetics (some types), kids, and pregnant women should use with caution."),
    entry("Preservatives",
        "Compounds used to increase shelf life; can cause allergies, breathing issues, or affect immunity in sensitive people.",
        "Kids, asthma patients, and people with skin problems should use cautiously."),
    entry("Food Colorings (E102, E110, etc.)",
        "Synthetic or natural dyes added for color. Some are linked to hyperactivity, allergies, and cancer risk in studies.",
        "Children and individuals with allergies should avoid certain food dyes."),
    entry("Artificial Flavorings",
        "Lab-made compounds to imitate or enhance flavor, sometimes causing hormonal disturbance or taste addiction.",
        "Kids and health-conscious individuals should reduce use."),
    entry("Stabilizers/Thickeners (E412, E407)",
        "Help maintain food texture; can upset digestion or cause bloating with regular, high use.",
        "IBS and gut-sensitive people should consume in moderation."),
    entry("Emulsifiers (E322, E475)",
        "Aid mixing of fats and water; with long-term excess can impact gut lining and absorption.",
        "Everyone should limit excess intake."),
    entry("Refined Flour / Maida",
        "Fine, white flour stripped of fiber and nutrition; causes quick sugar spikes.",
        "Diabetics, PCOS, and people with obesity should restrict use."),
    entry("Milk Solids / Casein / Whey",
        "Protein sources from milk; may provoke acne, gas, or bloating in lactose-intolerant or sensitive people.",
        "Lactose intolerance and acne-prone people should moderate use."),
    entry("Baking Soda (E500)",
        "Used for leavening; excess can cause gastric discomfort or acid/base imbalance.",
        "People with acidity, kidney, or electrolyte issues should moderate use."),
    entry("Synthetic Vinegar",
        "Strongly acidic flavoring; can irritate stomach or teeth enamel if overused.",
        "Avoid high use if you have ulcers or gastritis."),
    entry("Yeast Extract",
        "Savory flavor enhancer; may include natural MSG compounds.",
        "People sensitive to MSG or with migraines should be cautious."),
    entry("Acidity Regulators (Citric Acid)",
        "Maintain proper pH; may trigger reflux or ulcers in sensitive people.",
        "Gastritis and acid reflux patients should minimize use."),
    entry("Dextrose / Invert Sugar / Sorbitol",
        "Forms of sugar and sweeteners; quickly affect blood sugar and insulin levels.",
        "Diabetics and weight watchers beware of high amounts."),
    entry("Rice Bran Oil",
        "Healthy vegetable oil but high intake of any oil increases calories excessively.",
        "Generally safe, but keep fat intake moderate."),
    entry("Ajinomoto (MSG)",
        "Flavor enhancer (monosodium glutamate); can trigger headaches or weakness in some people.",
        "MSG-sensitive individuals and children should avoid large quantities."),
    entry("Black Salt",
        "Salty spice rich in minerals; too much adds to sodium overconsumption.",
        "People with high blood pressure should use with caution."),
    entry("Asafoetida (Hing)",
        "Used for flavor and digestion; helps some, may bloat sensitive stomachs.",
        "Use carefully if you suffer from gas or IBS."),
    entry("Tamarind Extract",
        "Sour pulp for tangy flavor; can worsen acid reflux or ulcers in excess.",
        "Acid reflux patients avoid excess."),
    entry("Curry Leaves Powder",
        "Natural, nutritious, and good for hair or digestion.",
        "Generally safe for all."),
    entry("Sorbic Acid (Preservative)",
        "Synthetic preservative sometimes causing mild irritation.",
        "Sensitive individuals may react; safe for most."),
    entry("Sodium Nitrite (E250)",
        "Preserves processed meats; long-term use linked to increased cancer risk.",
        "All people should limit intake of nitrite-cured meats."),
    entry("Tartaric Acid (E334)",
        "Adds sourness to foods and drinks; excess can upset digestion.",
        "People with IBS or acidity avoid excess."),
    entry("Lactic Acid (E270)",
        "Naturally occurring; too much can irritate sensitive stomachs.",
        "Those with ulcers or sensitive guts beware overuse."),
    entry("Cocoa Solids",
        "Used in chocolate; rich in antioxidants but high oxalates can cause kidney stones if overconsumed.",
        "Kidney stone-prone individuals should avoid excess."),
    entry("Barley Malt",
        "Natural sweetener containing gluten; can be hard to digest for some.",
        "Gluten-sensitive and celiac patients avoid."),
    entry("Chicory Root Extract",
        "High-fiber additive; good for digestion but may cause gas in sensitive people.",
        "IBS or gas-prone people should use in moderation."),
    entry("Cheese Powder / Butter Powder",
        "Salty, fatty powders used for flavoring; contain high salt and saturated fat.",
        "Obese people and heart patients should restrict intake."),
    entry("Paprika / Beetroot Extract",
        "Natural food colors rich in antioxidants.",
        "Safe for all; good color and nutrition source."),
    entry("Polyglycerol Esters (E475)",
        "Synthetic emulsifier used in processed foods; no nutrition but adds texture.",
        "Best limited by all, especially those avoiding processed foods."),
    entry("Sodium Metabisulphite (E223)",
        "Preservative possibly triggering asthma or breathing issues in sensitive people.",
        "Asthma patients and kids avoid where possible."),
    entry("Propylene Glycol (E1520)",
        "Moisturizer for food; can cause skin and gut irritation in high doses.",
        "Allergy-prone people use with care."),
    entry("Ammonium Bicarbonate",
        "Baking ingredient; safe but excessive intake is harsh on digestion.",
        "Avoid high intake for best gut health."),
    entry("Tamarind Seed Polysaccharide",
        "Natural thickener that aids digestion and food texture.",
        "Safe for all as a natural additive."),
    entry("Spices (Chili, Turmeric, etc.)",
        "Add flavor and have anti-inflammatory properties; excess chili can cause ulcers or burning.",
        "Safe in moderation; restrict if you have sensitive stomach."),
    entry("Onion/Garlic/Tomato Powder",
        "Flavor-boosting powders that may cause gas or acidity in some individuals.",
        "GERD, acidity, or IBS patients should limit."),
    entry("Gram Flour (Besan)",
        "High-protein flour made from ground chickpeas; nutritious but heavy to digest for some.",
        "Safe for most, but those with gastric trouble might limit consumption."),
];

/// スキャン結果に添える一行説明（ラベル表記そのままの名前で引く）
pub const SCAN_NOTES: &[(&str, &str)] = &[
    ("Sugar", "Sugar is a sweetener commonly used in food. High consumption can raise health risks like diabetes."),
    ("Salt", "Salt is essential for health but too much can raise blood pressure."),
    ("Palm Oil", "Palm oil is a vegetable oil. Its production may harm rainforests and overconsumption isn't heart-healthy."),
    ("Maltodextrin", "Food additive derived from starch, used as a thickener. It can spike blood sugar."),
    ("Monosodium Glutamate", "MSG is a flavor enhancer. Some people report mild sensitivity."),
    ("Soy Lecithin", "Soy lecithin is an emulsifier made from soybeans, common in processed foods."),
    ("Citric Acid", "Citric acid is a preservative and flavoring found naturally in citrus fruits."),
    ("Lactic Acid", "Lactic acid is used for preservation and food flavoring."),
    ("Corn Syrup", "A sweetener made from corn starch. High fructose versions may increase health risks."),
    ("Sodium Benzoate", "A preservative used to prolong shelf life. Generally safe in small amounts."),
    ("Potassium Sorbate", "Used as a preservative, considered safe by most standards."),
    ("Whey Protein", "Protein from milk; avoid if lactose intolerant or allergic to dairy."),
    ("Skimmed Milk Powder", "Dried milk; contains lactose and proteins from cow's milk."),
    ("Vegetable Oil", "Oils extracted from plants; check the source for allergies."),
    ("Sunflower Oil", "A common, mild-flavored oil useful for frying and baking."),
    ("Canola Oil", "Oil from rapeseed; low in saturated fat and widely used."),
    ("Artificial Flavour", "Chemically synthesized flavors not found in nature."),
    ("Natural Flavour", "Complex mixture from natural sources, but chemically processed."),
    ("Gelatin", "Protein from animal collagen; not suitable for vegetarians/vegans."),
    ("Egg White", "Egg component; high in protein, allergenic to some."),
    ("Egg Yolk", "Part of the egg rich in fat, cholesterol, and vitamins."),
    ("Gluten", "A protein in wheat and related grains. Avoid if celiac or gluten-sensitive."),
    ("Wheat Flour", "Powder from wheat; a common allergen and contains gluten."),
    ("Barley Malt", "Made from barley; can contain gluten."),
    ("Casein", "Main protein in milk; avoid if dairy-allergic."),
    ("Dextrose", "A simple sugar made from corn. Can increase blood sugar rapidly."),
    ("Fructose", "Simple sugar found in fruit. High amounts may strain the liver."),
    ("Xanthan Gum", "Thickener and stabilizer. Generally safe, but high doses can upset digestion."),
    ("Guar Gum", "Thickener from guar beans; may cause gas if sensitive."),
    ("Calcium Propionate", "Preservative often used in bread; safe, but can cause allergy in rare cases."),
    ("Sodium Nitrite", "Used to preserve meats; associated with cancer risk if eaten in excess."),
    ("Fully Hydrogenated Oil", "Oil processed to be solid at room temp; creates trans fats and raises heart disease risk."),
];

/// 名前・説明の部分一致検索（大文字小文字を区別しない）
///
/// 空のクエリは全件を返す。
pub fn search(query: &str) -> Vec<&'static EncyclopediaEntry> {
    let needle = query.trim().to_lowercase();
    ENTRIES
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.name.to_lowercase().contains(&needle)
                || e.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// 名前の完全一致で引く
pub fn lookup(name: &str) -> Option<&'static EncyclopediaEntry> {
    let name = name.trim();
    ENTRIES.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

/// スキャン結果の成分に添える説明
///
/// 一行説明 → 事典の説明 → 定型文 の順で探す。
pub fn describe(name: &str) -> String {
    let trimmed = name.trim();

    if let Some((_, note)) = SCAN_NOTES.iter().find(|(key, _)| *key == trimmed) {
        return (*note).to_string();
    }
    if let Some(e) = lookup(trimmed) {
        return e.description.to_string();
    }
    format!("No info available for \"{}\". Common food ingredient.", name)
}
