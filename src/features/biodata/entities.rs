use crate::features::reference::descriptor::{EntityDescriptor, FieldSpec};

pub static BANK: EntityDescriptor = EntityDescriptor {
    group: "biodata",
    segment: "banks",
    title: "Banks",
    table: "mst_banks",
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

pub static RELIGION: EntityDescriptor = EntityDescriptor {
    group: "biodata",
    segment: "religions",
    title: "Religions",
    table: "mst_religions",
    fields: &[
        FieldSpec::required("code", "Code", 2),
        FieldSpec::required("name", "Name", 255),
    ],
    searchable: &["code", "name"],
    search_fields: &["name"],
    relation_fields: &["code", "name"],
    relations: &[],
    natural_key: &["code"],
    default_sort: "name",
};

pub static JOB: EntityDescriptor = EntityDescriptor {
    group: "biodata",
    segment: "jobs",
    title: "Jobs",
    table: "mst_jobs",
    fields: &[
        FieldSpec::required("code", "Code", 10),
        FieldSpec::required("name", "Name", 255),
        FieldSpec::optional("description", "Description", 255),
    ],
    searchable: &["code", "name"],
    search_fields: &["code", "name"],
    relation_fields: &["code", "name"],
    relations: &[],
    natural_key: &["code"],
    default_sort: "name",
};

pub static MARRIAGE_STATUS: EntityDescriptor = EntityDescriptor {
    group: "biodata",
    segment: "marriage-statuses",
    title: "Marriage Statuses",
    table: "mst_marriage_statuses",
    fields: &[FieldSpec::required("name", "Name", 255)],
    searchable: &["name"],
    search_fields: &["name"],
    relation_fields: &["name"],
    relations: &[],
    natural_key: &["name"],
    default_sort: "name",
};

pub static ETHNIC: EntityDescriptor = EntityDescriptor {
    group: "biodata",
    segment: "ethnics",
    title: "Ethnics",
    table: "mst_ethnics",
    fields: &[
        FieldSpec::required("name", "Name", 255),
        FieldSpec::optional("region_of_origin", "Region Of Origin", 255),
    ],
    searchable: &["name", "region_of_origin"],
    search_fields: &["name"],
    relation_fields: &["name"],
    relations: &[],
    natural_key: &["name"],
    default_sort: "name",
};

pub static ALMAMATER_SIZE: EntityDescriptor = EntityDescriptor {
    group: "biodata",
    segment: "almamater-sizes",
    title: "Almamater Sizes",
    table: "mst_almamater_sizes",
    fields: &[
        FieldSpec::required("code", "Code", 50),
        FieldSpec::required("size", "Size", 255),
        FieldSpec::required("chest_size", "Chest Size", 255),
        FieldSpec::required("arm_length", "Arm Length", 255),
        FieldSpec::required("body_length", "Body Length", 255),
    ],
    searchable: &["code", "size"],
    search_fields: &["code", "size"],
    relation_fields: &["code", "size"],
    relations: &[],
    natural_key: &["code"],
    default_sort: "code",
};

pub static ALL: [&EntityDescriptor; 6] = [
    &BANK,
    &RELIGION,
    &JOB,
    &MARRIAGE_STATUS,
    &ETHNIC,
    &ALMAMATER_SIZE,
];
