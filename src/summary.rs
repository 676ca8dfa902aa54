use crate::models::TagCategory;

/// Render the category rows as a fixed-width table, in output order.
pub fn format_categories(categories: &[TagCategory]) -> String {
    let mut out = format!(
        "{:<28} {:<8} {:>6} {:>14} {:>8}\n",
        "CATEGORY", "PRIMARY", "COUNT", "SUBCATEGORIES", "RELATED"
    );
    out.push_str(&"-".repeat(68));
    out.push('\n');
    for c in categories {
        out.push_str(&format!(
            "{:<28} {:<8} {:>6} {:>14} {:>8}\n",
            c.title,
            if c.is_primary { "yes" } else { "no" },
            c.count,
            c.subcategories.len(),
            c.related_tags.len()
        ));
    }
    out
}

pub fn print_categories(categories: &[TagCategory]) {
    print!("{}", format_categories(categories));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_rows_in_order() {
        let row = |title: &str, primary: bool| TagCategory {
            title: title.to_string(),
            icon: "label".to_string(),
            is_primary: primary,
            count: 3,
            subcategories: vec![],
            related_tags: vec![],
        };
        let table = format_categories(&[row("Visualization", true), row("Astronomy", false)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("CATEGORY"));
        assert!(lines[2].starts_with("Visualization") && lines[2].contains("yes"));
        assert!(lines[3].starts_with("Astronomy") && lines[3].contains("no"));
    }
}
