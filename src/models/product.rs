use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub code: String,
    pub image_path: Option<String>,
    pub selling_price: f64,
    pub cost_price: f64,
    pub quantity: i64,
}

/// A validated product that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub code: String,
    pub image_path: Option<String>,
    pub selling_price: f64,
    pub cost_price: f64,
    pub quantity: i64,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub image_path: Option<String>,
    pub selling_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub quantity: Option<i64>,
}

impl NewProduct {
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            code: self.code,
            image_path: self.image_path,
            selling_price: self.selling_price,
            cost_price: self.cost_price,
            quantity: self.quantity,
        }
    }
}

impl ProductChanges {
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(code) = self.code {
            product.code = code;
        }
        if let Some(image_path) = self.image_path {
            product.image_path = Some(image_path);
        }
        if let Some(price) = self.selling_price {
            product.selling_price = price;
        }
        if let Some(price) = self.cost_price {
            product.cost_price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}
