//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, OperationType};

#[derive(Tabled)]
struct CategoryRow<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Type")]
    category_type: OperationType,
    #[tabled(rename = "Name")]
    name: &'a str,
}

/// Format a list of categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.as_str(),
        category_type: c.category_type,
        name: &c.name,
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    #[test]
    fn test_list_shows_type() {
        let categories = vec![Category::from_parts(
            CategoryId::from("c1"),
            OperationType::Expense,
            "Food",
        )];
        let output = format_category_list(&categories);

        assert!(output.contains("EXPENSE"));
        assert!(output.contains("Food"));
    }
}
