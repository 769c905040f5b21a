pub mod biodata;
pub mod education;
pub mod reference;
pub mod region;

use reference::descriptor::EntityDescriptor;

/// Every served entity, parents before children within each group.
pub fn all_entities() -> Vec<&'static EntityDescriptor> {
    region::entities::ALL
        .iter()
        .chain(biodata::entities::ALL.iter())
        .chain(education::entities::ALL.iter())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entity_catalog_is_consistent() {
        let entities = all_entities();
        assert_eq!(entities.len(), 15);

        let tables: HashSet<_> = entities.iter().map(|e| e.table).collect();
        let paths: HashSet<_> = entities.iter().map(|e| e.base_path()).collect();
        assert_eq!(tables.len(), 15);
        assert_eq!(paths.len(), 15);

        for entity in &entities {
            let names = entity.field_names();
            assert!(entity.sort_column(entity.default_sort).is_some(), "{}", entity.table);
            for column in entity
                .searchable
                .iter()
                .chain(entity.search_fields)
                .chain(entity.relation_fields)
                .chain(entity.natural_key)
            {
                assert!(names.contains(column), "{}.{}", entity.table, column);
            }
            for relation in entity.relations {
                assert!(names.contains(&relation.field));
                assert!(relation.route.starts_with("by-"));
            }
        }
    }
}
