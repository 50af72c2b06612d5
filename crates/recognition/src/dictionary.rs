//! Static ingredient catalog.
//!
//! Entries are lower-case canonical names. The matcher scans them in
//! declaration order and returns the first entry that satisfies a rule, so the
//! order below is observable: compound names precede their head words
//! ("olive oil" before "olive", "bell pepper" before "pepper"), and longer
//! fruit names precede short prefixes they contain ("pear" before "pea").

/// Canonical ingredient names, in lookup order.
pub const INGREDIENTS: &[&str] = &[
    // Condiments and oils
    "olive oil",
    "soy sauce",
    "peanut butter",
    "maple syrup",
    "black pepper",
    "vinegar",
    "honey",
    "sugar",
    "salt",
    "ketchup",
    "mustard",
    "mayonnaise",
    // Herbs and spices
    "cinnamon",
    "paprika",
    "cumin",
    "basil",
    "parsley",
    "cilantro",
    "rosemary",
    "thyme",
    "oregano",
    "mint",
    "dill",
    // Fruits
    "grapefruit",
    "grape",
    "pineapple",
    "apple",
    "banana",
    "orange",
    "lemon",
    "lime",
    "strawberry",
    "blueberry",
    "raspberry",
    "blackberry",
    "cherry tomato",
    "cherry",
    "peach",
    "pear",
    "plum",
    "apricot",
    "mango",
    "watermelon",
    "melon",
    "kiwi",
    "papaya",
    "pomegranate",
    "coconut",
    "avocado",
    // Vegetables
    "sweet potato",
    "potato",
    "tomato",
    "green onion",
    "onion",
    "garlic",
    "ginger",
    "carrot",
    "celery",
    "cucumber",
    "zucchini",
    "eggplant",
    "bell pepper",
    "chili pepper",
    "jalapeno",
    "pepper",
    "broccoli",
    "cauliflower",
    "cabbage",
    "lettuce",
    "spinach",
    "kale",
    "arugula",
    "asparagus",
    "green bean",
    "chickpea",
    "lentil",
    "bean",
    "pea",
    "corn",
    "mushroom",
    "leek",
    "radish",
    "beet",
    "pumpkin",
    "squash",
    "artichoke",
    "olive",
    // Meat, fish and protein
    "chicken breast",
    "chicken",
    "ground beef",
    "steak",
    "beef",
    "pork",
    "bacon",
    "ham",
    "sausage",
    "turkey",
    "lamb",
    "salmon",
    "tuna",
    "shrimp",
    "cod",
    "tofu",
    "egg",
    // Nuts
    "peanut",
    "almond",
    "walnut",
    "cashew",
    // Dairy
    "cream cheese",
    "sour cream",
    "parmesan",
    "mozzarella",
    "cheddar",
    "cheese",
    "butter",
    "milk",
    "yogurt",
    "cream",
    // Grains and bakery
    "brown rice",
    "rice",
    "spaghetti",
    "pasta",
    "noodle",
    "bread",
    "tortilla",
    "flour",
    "oats",
    "quinoa",
    "couscous",
    "chocolate",
];

/// Classifier labels too broad to name a specific ingredient.
pub const GENERIC_LABELS: &[&str] = &[
    "food",
    "produce",
    "ingredient",
    "ingredients",
    "vegetable",
    "vegetables",
    "fruit",
    "fruits",
    "natural foods",
    "whole food",
    "local food",
    "staple food",
    "superfood",
    "vegan nutrition",
    "food group",
    "finger food",
    "comfort food",
    "fast food",
    "junk food",
    "baked goods",
    "packaged goods",
    "dish",
    "cuisine",
    "recipe",
    "meal",
    "breakfast",
    "lunch",
    "dinner",
    "dessert",
    "snack",
    "drink",
    "beverage",
    "meat",
    "seafood",
    "sauce",
    "spice",
    "herb",
    "condiment",
    "plant",
    "flowering plant",
    "terrestrial plant",
    "annual plant",
    "leaf vegetable",
    "root vegetable",
    "tableware",
    "dishware",
    "serveware",
    "plate",
    "bowl",
    "kitchen",
    "cooking",
    "table",
    "wood",
    "still life",
    "still life photography",
    "close-up",
    "macro photography",
    "tints and shades",
    "rectangle",
    "circle",
    "font",
    "food storage containers",
    "container",
    "bottle",
    "jar",
    "plastic",
    "label",
    "brand",
    "logo",
];

/// Returns true when `normalized` (already lower-cased and trimmed) is a generic label.
pub fn is_generic_label(normalized: &str) -> bool {
    GENERIC_LABELS.contains(&normalized)
}
