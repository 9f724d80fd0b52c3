//! In-memory operations over the parent-pointer category tree.
//!
//! Everything here works on a flat snapshot of the table. Traversals keep a
//! visited set, so a corrupt cyclic graph terminates instead of recursing
//! forever.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::features::categories::dtos::CategoryTreeDto;
use crate::features::categories::models::{Category, CategoryLink};

/// Nest a flat category list into root nodes with `sub_categories`.
///
/// Sibling order follows the order of `categories`. Nodes that are only
/// reachable through a cycle are left out.
pub fn build_forest(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
    let mut children: HashMap<Option<Uuid>, Vec<&Category>> = HashMap::new();
    for category in &categories {
        children
            .entry(category.parent_category_id)
            .or_default()
            .push(category);
    }

    let mut visited = HashSet::new();
    children
        .get(&None)
        .map(|roots| {
            roots
                .iter()
                .filter_map(|root| build_node(root, &children, &mut visited))
                .collect()
        })
        .unwrap_or_default()
}

fn build_node(
    category: &Category,
    children: &HashMap<Option<Uuid>, Vec<&Category>>,
    visited: &mut HashSet<Uuid>,
) -> Option<CategoryTreeDto> {
    if !visited.insert(category.id) {
        return None;
    }

    let sub_categories = children
        .get(&Some(category.id))
        .map(|kids| {
            kids.iter()
                .filter_map(|kid| build_node(kid, children, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(CategoryTreeDto::from_category(category, sub_categories))
}

/// Ids of `root` and all of its descendants, deepest first and `root` last.
///
/// Deleting in this order never removes a parent before its children.
pub fn collect_subtree(root: Uuid, links: &[CategoryLink]) -> Vec<Uuid> {
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        if let Some(parent) = link.parent_category_id {
            children.entry(parent).or_default().push(link.id);
        }
    }

    // pre-order walk, reversed at the end
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        order.push(id);
        if let Some(kids) = children.get(&id) {
            stack.extend(kids.iter().rev().copied());
        }
    }

    order.reverse();
    order
}

/// True when `candidate` is `root` itself or lies somewhere below it
pub fn is_in_subtree(candidate: Uuid, root: Uuid, links: &[CategoryLink]) -> bool {
    collect_subtree(root, links).contains(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(name: &str, parent: Option<Uuid>) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            parent_category_id: parent,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn link(id: Uuid, parent: Option<Uuid>) -> CategoryLink {
        CategoryLink {
            id,
            parent_category_id: parent,
        }
    }

    #[test]
    fn test_build_forest_nests_children() {
        let news = category("News", None);
        let local = category("Local", Some(news.id));
        let city = category("City", Some(local.id));
        let sport = category("Sport", None);

        let forest = build_forest(vec![news.clone(), local.clone(), city.clone(), sport.clone()]);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, news.id);
        assert_eq!(forest[0].sub_categories.len(), 1);
        assert_eq!(forest[0].sub_categories[0].id, local.id);
        assert_eq!(forest[0].sub_categories[0].sub_categories[0].id, city.id);
        assert_eq!(forest[1].id, sport.id);
        assert!(forest[1].sub_categories.is_empty());
    }

    #[test]
    fn test_build_forest_skips_cycles() {
        let mut a = category("A", None);
        let mut b = category("B", None);
        a.parent_category_id = Some(b.id);
        b.parent_category_id = Some(a.id);
        let root = category("Root", None);

        let forest = build_forest(vec![a, b, root.clone()]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, root.id);
    }

    #[test]
    fn test_collect_subtree_is_post_order() {
        let root = Uuid::new_v4();
        let child_a = Uuid::new_v4();
        let child_b = Uuid::new_v4();
        let grandchild = Uuid::new_v4();
        let unrelated = Uuid::new_v4();

        let links = vec![
            link(root, None),
            link(child_a, Some(root)),
            link(child_b, Some(root)),
            link(grandchild, Some(child_a)),
            link(unrelated, None),
        ];

        let order = collect_subtree(root, &links);

        assert_eq!(order.len(), 4);
        assert_eq!(*order.last().unwrap(), root);
        assert!(!order.contains(&unrelated));

        let pos = |id| order.iter().position(|x| *x == id).unwrap();
        assert!(pos(grandchild) < pos(child_a));
        assert!(pos(child_a) < pos(root));
        assert!(pos(child_b) < pos(root));
    }

    #[test]
    fn test_collect_subtree_terminates_on_cycle() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let links = vec![link(a, Some(b)), link(b, Some(a))];

        let order = collect_subtree(a, &links);

        assert_eq!(order.len(), 2);
        assert_eq!(order[1], a);
    }

    #[test]
    fn test_is_in_subtree() {
        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        let other = Uuid::new_v4();
        let links = vec![link(root, None), link(child, Some(root)), link(other, None)];

        assert!(is_in_subtree(root, root, &links));
        assert!(is_in_subtree(child, root, &links));
        assert!(!is_in_subtree(root, child, &links));
        assert!(!is_in_subtree(other, root, &links));
    }
}
