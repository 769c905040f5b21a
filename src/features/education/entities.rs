use crate::features::reference::descriptor::{EntityDescriptor, FieldSpec, RelationSpec};

pub static EDUCATIONAL_LEVEL: EntityDescriptor = EntityDescriptor {
    group: "education",
    segment: "educational-levels",
    title: "Educational Levels",
    table: "mst_educational_levels",
    fields: &[
        FieldSpec::required("code", "Code", 3),
        FieldSpec::required("name", "Name", 255),
        FieldSpec::required("description", "Description", 255),
    ],
    searchable: &["code", "name"],
    search_fields: &["code", "name"],
    relation_fields: &["code", "name"],
    relations: &[],
    natural_key: &["code"],
    default_sort: "name",
};

pub static STUDY_PROGRAM: EntityDescriptor = EntityDescriptor {
    group: "education",
    segment: "study-programs",
    title: "Study Programs",
    table: "mst_study_programs",
    fields: &[FieldSpec::required("name", "Name", 255)],
    searchable: &["name"],
    search_fields: &["name"],
    relation_fields: &["name"],
    relations: &[],
    natural_key: &["name"],
    default_sort: "name",
};

pub static UNSIA_STUDY_PROGRAM: EntityDescriptor = EntityDescriptor {
    group: "education",
    segment: "unsia-study-programs",
    title: "Unsia Study Programs",
    table: "mst_unsia_study_programs",
    fields: &[
        FieldSpec::required("code", "Code", 10),
        FieldSpec::required("name", "Name", 255),
    ],
    searchable: &["code", "name"],
    search_fields: &["code", "name"],
    relation_fields: &["code", "name"],
    relations: &[],
    natural_key: &["code"],
    default_sort: "name",
};

/// A study program is optional: levels such as primary school have none.
pub static EDUCATION: EntityDescriptor = EntityDescriptor {
    group: "education",
    segment: "educations",
    title: "Educations",
    table: "mst_educations",
    fields: &[
        FieldSpec::required("educational_level_id", "Educational Level ID", 36),
        FieldSpec::optional("study_program_id", "Study Program ID", 36),
        FieldSpec::required("name", "Name", 255),
    ],
    searchable: &["name"],
    search_fields: &["name"],
    relation_fields: &["name"],
    relations: &[
        RelationSpec {
            name: "educational_level",
            field: "educational_level_id",
            route: "by-educational-level",
            target: &EDUCATIONAL_LEVEL,
        },
        RelationSpec {
            name: "study_program",
            field: "study_program_id",
            route: "by-study-program",
            target: &STUDY_PROGRAM,
        },
    ],
    natural_key: &["educational_level_id", "study_program_id", "name"],
    default_sort: "name",
};

pub static ALL: [&EntityDescriptor; 4] = [
    &EDUCATIONAL_LEVEL,
    &STUDY_PROGRAM,
    &UNSIA_STUDY_PROGRAM,
    &EDUCATION,
];
