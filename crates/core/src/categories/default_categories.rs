//! Built-in categories shipped with the tracker.

use crate::categories::Category;
use crate::transactions::TransactionType;

/// A built-in category. Slugs are stable and double as local identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    pub slug: &'static str,
    pub category_type: TransactionType,
    pub name: &'static str,
    pub description: &'static str,
}

impl DefaultCategory {
    pub fn to_category(&self) -> Category {
        Category {
            id: self.slug.to_string(),
            category_type: self.category_type,
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            is_default: true,
            created_at: None,
        }
    }
}

const fn income(slug: &'static str, name: &'static str, description: &'static str) -> DefaultCategory {
    DefaultCategory {
        slug,
        category_type: TransactionType::Income,
        name,
        description,
    }
}

const fn expense(slug: &'static str, name: &'static str, description: &'static str) -> DefaultCategory {
    DefaultCategory {
        slug,
        category_type: TransactionType::Expense,
        name,
        description,
    }
}

pub const DEFAULT_CATEGORIES: [DefaultCategory; 22] = [
    income("paycheck", "Paycheck", "Primary income from work"),
    income(
        "other-income",
        "Other income",
        "Other income you get (birthday money, etc.)",
    ),
    expense(
        "housing",
        "Housing",
        "Rent, mortgage, property fixes, property taxes...",
    ),
    expense(
        "transportation",
        "Transportation",
        "Car payment, public transport, car fixes, gas...",
    ),
    expense(
        "suministros",
        "Suministros",
        "Electricity, garbage, water, heating, phone, wifi, cable...",
    ),
    expense("grocery", "Grocery", "Groceries, pet food..."),
    expense(
        "restaurants",
        "Restaurants",
        "Restaurantes, comer fuera y pedir a domicilio",
    ),
    expense("clothing", "Clothing", "Clothes and shoes"),
    expense(
        "subscription",
        "Subscription",
        "Spotify, Netflix and other types of subscriptions",
    ),
    expense(
        "desarrollo-personal",
        "Desarrollo personal",
        "Libros, cuota gym, suplementos...",
    ),
    expense(
        "otros-gastos",
        "Otros gastos personales",
        "Cortes de pelo, cosméticos u otros gastos difícil de categorizar",
    ),
    expense("gifts", "Gifts", "All types of gift giving"),
    expense("entertainment", "Entertainment", "Games, movies, concerts..."),
    expense("vacation", "Vacation", "Vacation spendings or savings"),
    expense(
        "drinks-tapas",
        "Drinks, Tapas, Tomar Algo",
        "Cervecillas y tomar algo por ahí",
    ),
    expense(
        "party",
        "Party",
        "Salir de fiesta, taxis, ubers de vuelta...",
    ),
    expense("efectivo", "Efectivo", "Sacar efectivo"),
    expense(
        "planes-finde",
        "Planes finde",
        "Planes fin de semana (trenes, alojamientos...)",
    ),
    expense("golf", "Golf", "Gastos de golf"),
    expense("impuestos-multas", "Impuestos/multas", "Jodiendas a pagar"),
    expense("deporte", "Deporte", "Gastos relacionados con el deporte"),
    expense(
        "glovo",
        "Glovo",
        "Glovos u otros caprichos como tartas de queso y demás",
    ),
];

/// Built-in categories of one type, in display order.
pub fn default_categories(category_type: TransactionType) -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .filter(|c| c.category_type == category_type)
        .map(DefaultCategory::to_category)
        .collect()
}

/// Defaults of `category_type` followed by the matching custom categories.
pub fn categories_for_type(category_type: TransactionType, customs: &[Category]) -> Vec<Category> {
    let mut categories = default_categories(category_type);
    categories.extend(
        customs
            .iter()
            .filter(|c| c.category_type == category_type)
            .cloned(),
    );
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn defaults_split_by_type() {
        assert_eq!(default_categories(TransactionType::Income).len(), 2);
        assert_eq!(default_categories(TransactionType::Expense).len(), 20);
        assert!(default_categories(TransactionType::Expense)
            .iter()
            .all(|c| c.is_default));
    }

    #[test]
    fn default_keys_and_slugs_are_unique() {
        let slugs: HashSet<_> = DEFAULT_CATEGORIES.iter().map(|c| c.slug).collect();
        assert_eq!(slugs.len(), DEFAULT_CATEGORIES.len());
        let keys: HashSet<_> = DEFAULT_CATEGORIES
            .iter()
            .map(|c| c.to_category().key())
            .collect();
        assert_eq!(keys.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn customs_follow_defaults_for_matching_type_only() {
        let customs = vec![
            Category {
                id: "custom-1".to_string(),
                category_type: TransactionType::Expense,
                name: "Pets".to_string(),
                description: None,
                is_default: false,
                created_at: None,
            },
            Category {
                id: "custom-2".to_string(),
                category_type: TransactionType::Income,
                name: "Dividends".to_string(),
                description: None,
                is_default: false,
                created_at: None,
            },
        ];

        let income = categories_for_type(TransactionType::Income, &customs);
        assert_eq!(income.len(), 3);
        assert_eq!(income[0].id, "paycheck");
        assert_eq!(income.last().map(|c| c.name.as_str()), Some("Dividends"));
    }
}
