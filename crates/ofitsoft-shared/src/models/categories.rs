use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{
    generate_id, next_order, slugify, CollectionLens, ContentDocument, Entry, Ordered, Parent,
};
use crate::ops;

/// Service/product categories with their subcategory names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesContent {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

impl Category {
    /// A category with a fresh id, placed after the existing ones. An empty
    /// slug is derived from the name.
    pub fn new(doc: &CategoriesContent, name: &str, slug: &str) -> Self {
        let slug = if slug.trim().is_empty() {
            slugify(name)
        } else {
            slug.to_string()
        };
        Self {
            id: generate_id("category", &doc.categories),
            name: name.to_string(),
            slug,
            order: next_order(&doc.categories),
            subcategories: Vec::new(),
        }
    }
}

impl Entry for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Parent for Category {
    type Child = String;

    fn children(&self) -> &[String] {
        &self.subcategories
    }

    fn children_mut(&mut self) -> &mut Vec<String> {
        &mut self.subcategories
    }
}

impl Ordered for Category {
    fn order(&self) -> i32 {
        self.order
    }
}

pub const CATEGORIES: CollectionLens<CategoriesContent, Category> = CollectionLens {
    name: "categories",
    get: |d| &d.categories,
    get_mut: |d| &mut d.categories,
};

impl ContentDocument for CategoriesContent {
    const DOMAIN: &'static str = "categories";
    const STORAGE_KEY: &'static str = "categories-storage";

    fn defaults() -> Self {
        Self {
            categories: vec![
                Category {
                    id: "category-1".to_string(),
                    name: "Web Development".to_string(),
                    slug: "web-development".to_string(),
                    order: 0,
                    subcategories: vec!["Landing Pages".to_string(), "E-commerce".to_string()],
                },
                Category {
                    id: "category-2".to_string(),
                    name: "UI/UX Design".to_string(),
                    slug: "ui-ux-design".to_string(),
                    order: 1,
                    subcategories: vec!["Prototyping".to_string()],
                },
            ],
            last_updated: DateTime::<Utc>::default(),
        }
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    fn set_last_updated(&mut self, at: DateTime<Utc>) {
        self.last_updated = at;
    }
}

pub fn add_category(doc: &mut CategoriesContent, category: Category) -> bool {
    ops::add_entry(doc, CATEGORIES, category)
}

pub fn delete_category(doc: &mut CategoriesContent, id: &str) -> bool {
    ops::remove_entry(doc, CATEGORIES, id)
}

pub fn add_subcategory(doc: &mut CategoriesContent, category_id: &str, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    ops::add_nested_entry(doc, CATEGORIES, category_id, name.to_string())
}

pub fn remove_subcategory(doc: &mut CategoriesContent, category_id: &str, name: &str) -> bool {
    ops::remove_nested_entry(doc, CATEGORIES, category_id, name)
}
