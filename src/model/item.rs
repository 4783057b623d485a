use crate::model::Rating;
use crate::ParseError;
use std::collections::HashMap;

/// Column names of an item record, in output order
pub const COLUMNS: [&str; 10] = [
    "product_page_url",
    "universal_product_code",
    "book_title",
    "price_including_tax",
    "price_excluding_tax",
    "quantity_available",
    "product_description",
    "category",
    "review_rating",
    "image_url",
];

/// Raw field values gathered from one item page
///
/// Turned into an `ItemRecord` through `ItemRecord::new`, which enforces the
/// record invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    pub source_url: String,
    pub upc: String,
    pub title: String,
    pub price_including_tax: String,
    pub price_excluding_tax: String,
    pub quantity_available: u32,
    pub description: String,
    pub category: String,
    pub rating: Option<Rating>,
    pub image_url: String,
}

/// One item page flattened into a fixed schema
///
/// Every record has a non-empty source URL and title. Other text fields are
/// empty strings when the page omits them, so all records of a collection
/// share the same columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    fields: ItemFields,
}

impl ItemRecord {
    /// Validates and freezes a set of fields
    pub fn new(mut fields: ItemFields) -> Result<Self, ParseError> {
        fields.source_url = fields.source_url.trim().to_string();
        fields.title = fields.title.trim().to_string();

        if fields.source_url.is_empty() {
            return Err(ParseError::InvalidRecord(
                "record has an empty source URL".to_string(),
            ));
        }

        if fields.title.is_empty() {
            return Err(ParseError::InvalidRecord(format!(
                "record for {} has an empty title",
                fields.source_url
            )));
        }

        Ok(Self { fields })
    }

    pub fn source_url(&self) -> &str {
        &self.fields.source_url
    }

    /// Universal product code
    pub fn upc(&self) -> &str {
        &self.fields.upc
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }

    pub fn price_including_tax(&self) -> &str {
        &self.fields.price_including_tax
    }

    pub fn price_excluding_tax(&self) -> &str {
        &self.fields.price_excluding_tax
    }

    pub fn quantity_available(&self) -> u32 {
        self.fields.quantity_available
    }

    pub fn description(&self) -> &str {
        &self.fields.description
    }

    pub fn category(&self) -> &str {
        &self.fields.category
    }

    pub fn rating(&self) -> Option<Rating> {
        self.fields.rating
    }

    pub fn image_url(&self) -> &str {
        &self.fields.image_url
    }

    /// Column/value pairs in `COLUMNS` order
    pub fn columns(&self) -> Vec<(&'static str, String)> {
        let f = &self.fields;
        let values = [
            f.source_url.clone(),
            f.upc.clone(),
            f.title.clone(),
            f.price_including_tax.clone(),
            f.price_excluding_tax.clone(),
            f.quantity_available.to_string(),
            f.description.clone(),
            f.category.clone(),
            f.rating.map(|r| r.as_str().to_string()).unwrap_or_default(),
            f.image_url.clone(),
        ];
        COLUMNS.into_iter().zip(values).collect()
    }

    /// Rebuilds a record from named columns, e.g. a row read back from CSV
    ///
    /// Absent columns are treated as empty. Unknown columns are ignored.
    pub fn from_columns(row: &HashMap<String, String>) -> Result<Self, ParseError> {
        let get = |name: &str| row.get(name).cloned().unwrap_or_default();

        let quantity = get("quantity_available");
        let quantity_available = if quantity.trim().is_empty() {
            0
        } else {
            quantity.trim().parse::<u32>().map_err(|_| {
                ParseError::InvalidRecord(format!("invalid quantity_available '{}'", quantity))
            })?
        };

        let rating_text = get("review_rating");
        let rating = if rating_text.trim().is_empty() {
            None
        } else {
            Some(rating_text.parse::<Rating>().map_err(ParseError::InvalidRecord)?)
        };

        Self::new(ItemFields {
            source_url: get("product_page_url"),
            upc: get("universal_product_code"),
            title: get("book_title"),
            price_including_tax: get("price_including_tax"),
            price_excluding_tax: get("price_excluding_tax"),
            quantity_available,
            description: get("product_description"),
            category: get("category"),
            rating,
            image_url: get("image_url"),
        })
    }
}
