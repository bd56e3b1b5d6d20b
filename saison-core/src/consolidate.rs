//! Shopping list consolidation.

use std::collections::HashMap;

use crate::types::Ingredient;

/// Merge several ingredient lists into one, deduplicated by case-insensitive name.
///
/// The first occurrence of a name keeps its position, spelling and unit. Later
/// occurrences only append their quantity: `"2"` then `"3"` becomes `"2 + 3"`.
/// Units are never reconciled.
pub fn consolidate<I>(lists: I) -> Vec<Ingredient>
where
    I: IntoIterator<Item = Vec<Ingredient>>,
{
    let mut merged: Vec<Ingredient> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for ingredient in lists.into_iter().flatten() {
        let key = ingredient.name.to_lowercase();
        match index_by_key.get(&key) {
            Some(&index) => {
                let existing = &mut merged[index];
                existing.quantity = format!("{} + {}", existing.quantity, ingredient.quantity);
            }
            None => {
                index_by_key.insert(key, merged.len());
                merged.push(ingredient);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merges_case_insensitive_duplicates() {
        let result = consolidate(vec![
            vec![Ingredient::new("Egg", "2", "pcs")],
            vec![Ingredient::new("egg", "3", "pcs")],
        ]);

        assert_eq!(result, vec![Ingredient::new("Egg", "2 + 3", "pcs")]);
    }

    #[test]
    fn test_keeps_first_seen_order_and_unit() {
        let result = consolidate(vec![
            vec![
                Ingredient::new("Leeks", "2", "pieces"),
                Ingredient::new("Gruyère", "100", "g"),
            ],
            vec![
                Ingredient::new("Potatoes", "500", "g"),
                Ingredient::new("GRUYÈRE", "0.2", "kg"),
                Ingredient::new("leeks", "1", ""),
            ],
            vec![Ingredient::new("Gruyère", "50", "g")],
        ]);

        assert_eq!(
            result,
            vec![
                Ingredient::new("Leeks", "2 + 1", "pieces"),
                Ingredient::new("Gruyère", "100 + 0.2 + 50", "g"),
                Ingredient::new("Potatoes", "500", "g"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(consolidate(Vec::<Vec<Ingredient>>::new()).is_empty());
        assert!(consolidate(vec![vec![], vec![]]).is_empty());
    }
}
