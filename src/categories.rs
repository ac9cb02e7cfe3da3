//! System and user-defined categories applied after parsing.

use serde::Deserialize;

use crate::categorizer::matches_any;
use crate::error::CategoryError;

const SYSTEM_CATEGORIES: &[(&str, &str, &str)] = &[
    (
        "Food & Dining",
        "Restaurants, cafes, groceries, and food delivery",
        "restaurant,cafe,food,grocery,supermarket,burger,pizza,chicken,market,eatery,diner,bakery",
    ),
    (
        "Transportation",
        "Public transport, ride-sharing, fuel, and vehicle maintenance",
        "uber,bolt,taxi,transport,fuel,petrol,bus,train,flight,airline,car,auto,garage",
    ),
    (
        "Utilities",
        "Electricity, water, gas, internet, and phone bills",
        "electricity,water,gas,dstv,gotv,internet,wifi,phone,mobile,utility,bill,power,telecom",
    ),
    (
        "Entertainment",
        "Movies, streaming services, events, and recreation",
        "cinema,movie,theatre,netflix,spotify,game,betting,entertainment,concert,show,ticket",
    ),
    (
        "Shopping",
        "Retail purchases, clothing, and electronics",
        "mall,store,shop,retail,clothing,fashion,electronics,gadget,amazon,jumia,konga",
    ),
    (
        "Healthcare",
        "Medical expenses, pharmacy, and health insurance",
        "hospital,clinic,pharmacy,medical,doctor,dental,health,drug,medicine,insurance",
    ),
    (
        "Education",
        "School fees, courses, books, and training",
        "school,college,university,tuition,course,training,education,book,class,seminar",
    ),
    (
        "Housing",
        "Rent, mortgage, and home maintenance",
        "rent,house,apartment,mortgage,maintenance,repair,property,estate,accommodation",
    ),
    (
        "Income",
        "Salary, investments, and other income",
        "salary,wage,payment,credit,income,interest,dividend,investment,return",
    ),
    ("Other", "Uncategorized transactions", ""),
];

/// A named keyword list, either shared by everyone or owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    description: String,
    keywords: String,
    owner: Option<String>,
    keyword_list: Vec<String>,
}

impl Category {
    pub fn system(name: &str, description: &str, keywords: &str) -> Self {
        Self::build(None, name, description, keywords)
    }

    pub fn custom(owner: &str, name: &str, description: &str, keywords: &str) -> Self {
        Self::build(Some(owner.to_owned()), name, description, keywords)
    }

    fn build(owner: Option<String>, name: &str, description: &str, keywords: &str) -> Self {
        let keyword_list = keywords
            .split(',')
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            keywords: keywords.to_owned(),
            owner,
            keyword_list,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The comma-separated keywords as they were entered.
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn is_system(&self) -> bool {
        self.owner.is_none()
    }

    /// Trimmed, lowercased, non-blank keywords.
    pub fn keyword_list(&self) -> &[String] {
        &self.keyword_list
    }

    fn matches(&self, lowered_description: &str) -> bool {
        matches_any(lowered_description, &self.keyword_list)
    }
}

#[derive(Debug, Deserialize)]
struct CategoryFile {
    #[serde(default)]
    category: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    description: String,
    keywords: String,
}

/// The combined set of system categories and every user's custom categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default system categories every user sees.
    pub fn system_defaults() -> Self {
        Self {
            categories: SYSTEM_CATEGORIES
                .iter()
                .map(|(name, description, keywords)| Category::system(name, description, keywords))
                .collect(),
        }
    }

    /// Adds a category. Names are unique per owner; system categories share one namespace.
    pub fn insert(&mut self, category: Category) -> Result<(), CategoryError> {
        let duplicate = self
            .categories
            .iter()
            .any(|existing| existing.owner == category.owner && existing.name == category.name);
        if duplicate {
            return Err(CategoryError::Duplicate {
                owner: category.owner,
                name: category.name,
            });
        }
        self.categories.push(category);
        Ok(())
    }

    pub fn add_custom(
        &mut self,
        owner: &str,
        name: &str,
        description: &str,
        keywords: &str,
    ) -> Result<(), CategoryError> {
        self.insert(Category::custom(owner, name, description, keywords))
    }

    /// Adds every `[[category]]` table of `text` as a custom category of `owner`.
    ///
    /// Either all categories of the file are added or none are. Returns how many were added.
    pub fn load_custom_toml(&mut self, owner: &str, text: &str) -> Result<usize, CategoryError> {
        let file: CategoryFile = toml::from_str(text)?;
        let mut updated = self.clone();
        for entry in &file.category {
            updated.add_custom(owner, &entry.name, &entry.description, &entry.keywords)?;
        }
        *self = updated;
        Ok(file.category.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// System categories plus the ones `owner` created, ordered by name.
    ///
    /// Names are compared without case to pick a single category per name: the first one in
    /// name order keeps its position, and a custom category replaces a system one there.
    pub fn visible_to(&self, owner: Option<&str>) -> Vec<&Category> {
        let mut visible: Vec<&Category> = self
            .categories
            .iter()
            .filter(|category| category.is_system() || category.owner() == owner)
            .collect();
        visible.sort_by(|a, b| a.name.cmp(&b.name));

        let mut slots: Vec<(String, &Category)> = Vec::with_capacity(visible.len());
        for category in visible {
            let key = category.name.to_lowercase();
            match slots.iter_mut().find(|(slot_key, _)| *slot_key == key) {
                Some((_, slot)) => {
                    if !(category.is_system() && !slot.is_system()) {
                        *slot = category;
                    }
                }
                None => slots.push((key, category)),
            }
        }
        slots.into_iter().map(|(_, category)| category).collect()
    }

    /// First category visible to `owner` with a keyword inside `description`.
    pub fn resolve(&self, owner: Option<&str>, description: &str) -> Option<&Category> {
        let lowered = description.to_lowercase();
        self.visible_to(owner)
            .into_iter()
            .find(|category| category.matches(&lowered))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names<'a>(categories: &[&'a Category]) -> Vec<&'a str> {
        categories.iter().map(|category| category.name()).collect()
    }

    fn resolved_name<'a>(
        set: &'a CategorySet,
        owner: Option<&str>,
        description: &str,
    ) -> Option<&'a str> {
        set.resolve(owner, description).map(Category::name)
    }

    #[test]
    fn should_provide_ten_system_categories_sorted_by_name() {
        let set = CategorySet::system_defaults();
        assert!(set.iter().all(Category::is_system));
        assert_eq!(
            vec![
                "Education",
                "Entertainment",
                "Food & Dining",
                "Healthcare",
                "Housing",
                "Income",
                "Other",
                "Shopping",
                "Transportation",
                "Utilities",
            ],
            names(&set.visible_to(None))
        );
    }

    #[test]
    fn should_split_keywords_on_commas() {
        let category = Category::system("Streaming", "", " Netflix, ,SPOTIFY ,");
        assert_eq!(vec!["netflix", "spotify"], category.keyword_list());
        assert_eq!(" Netflix, ,SPOTIFY ,", category.keywords());
    }

    #[test]
    fn should_resolve_by_name_order() {
        let set = CategorySet::system_defaults();
        // "rent" is Housing, "salary" is Income; Housing sorts first
        assert_eq!(
            Some("Housing"),
            resolved_name(&set, None, "SALARY ADVANCE FOR RENT")
        );
        assert_eq!(Some("Income"), resolved_name(&set, None, "SALARY JANUARY"));
    }

    #[test]
    fn should_match_keywords_inside_words() {
        let set = CategorySet::system_defaults();
        assert_eq!(
            Some("Transportation"),
            resolved_name(&set, None, "SCARECROW")
        );
    }

    #[test]
    fn should_never_resolve_to_a_category_without_keywords() {
        let set = CategorySet::system_defaults();
        assert_eq!(None, resolved_name(&set, None, "NIP TRANSFER TO ADAEZE"));
    }

    #[test]
    fn should_show_custom_categories_to_their_owner_only() {
        let mut set = CategorySet::system_defaults();
        set.add_custom("ada", "Charity", "Donations", "church,mosque,donation")
            .expect("new category");

        assert_eq!(
            Some("Charity"),
            resolved_name(&set, Some("ada"), "CHURCH OFFERING")
        );
        assert_eq!(None, resolved_name(&set, Some("bola"), "CHURCH OFFERING"));
        assert_eq!(None, resolved_name(&set, None, "CHURCH OFFERING"));
        assert_eq!(11, set.visible_to(Some("ada")).len());
        assert_eq!(10, set.visible_to(Some("bola")).len());
    }

    #[test]
    fn should_reject_duplicate_names_for_the_same_owner() {
        let mut set = CategorySet::system_defaults();
        set.add_custom("ada", "Charity", "", "church")
            .expect("new category");
        set.add_custom("bola", "Charity", "", "mosque")
            .expect("other owners may reuse the name");

        let err = set
            .add_custom("ada", "Charity", "", "donation")
            .expect_err("duplicate");
        assert_eq!("Category 'Charity' already exists for ada", err.to_string());

        let err = set
            .insert(Category::system("Income", "", "bonus"))
            .expect_err("duplicate");
        assert_eq!(
            "Category 'Income' already exists for the system",
            err.to_string()
        );
    }

    #[test]
    fn should_let_a_custom_category_shadow_a_system_category_of_the_same_name() {
        let mut set = CategorySet::system_defaults();
        set.add_custom("ada", "income", "Side hustle", "invoice")
            .expect("case differs from the system name");

        let visible = set.visible_to(Some("ada"));
        assert_eq!(10, visible.len());
        let income = visible[5];
        assert_eq!("income", income.name());
        assert_eq!(Some("ada"), income.owner());

        assert_eq!(Some("income"), resolved_name(&set, Some("ada"), "INVOICE 42"));
        assert_eq!(None, resolved_name(&set, Some("ada"), "SALARY JANUARY"));
        assert_eq!(Some("Income"), resolved_name(&set, None, "SALARY JANUARY"));
    }

    #[test]
    fn should_load_custom_categories_from_toml() {
        let mut set = CategorySet::system_defaults();
        let added = set
            .load_custom_toml(
                "ada",
                r#"
                [[category]]
                name = "Subscriptions"
                description = "Streaming and software"
                keywords = "netflix, github"

                [[category]]
                name = "Charity"
                keywords = "church"
                "#,
            )
            .expect("valid configuration");

        assert_eq!(2, added);
        assert_eq!(
            Some("Subscriptions"),
            resolved_name(&set, Some("ada"), "GITHUB SPONSORS")
        );
        let charity = set
            .iter()
            .find(|category| category.name() == "Charity")
            .expect("loaded");
        assert_eq!("", charity.description());
        assert_eq!(Some("ada"), charity.owner());
    }

    #[test]
    fn should_accept_an_empty_configuration() {
        let mut set = CategorySet::system_defaults();
        assert_eq!(0, set.load_custom_toml("ada", "").expect("empty file"));
        assert_eq!(CategorySet::system_defaults(), set);
    }

    #[test]
    fn should_leave_the_set_untouched_when_loading_fails() {
        let mut set = CategorySet::system_defaults();
        let err = set
            .load_custom_toml(
                "ada",
                r#"
                [[category]]
                name = "Charity"
                keywords = "church"

                [[category]]
                name = "Charity"
                keywords = "mosque"
                "#,
            )
            .expect_err("duplicate in file");
        assert!(matches!(err, CategoryError::Duplicate { .. }));
        assert_eq!(CategorySet::system_defaults(), set);

        let err = set
            .load_custom_toml("ada", "[[category]]\nname = 3")
            .expect_err("malformed file");
        assert!(matches!(err, CategoryError::Config(_)));
    }
}
