use crate::features::reference::descriptor::{EntityDescriptor, FieldSpec, RelationSpec};

pub static COUNTRY: EntityDescriptor = EntityDescriptor {
    group: "region",
    segment: "countries",
    title: "Countries",
    table: "mst_countries",
    fields: &[
        FieldSpec::required("name", "Name", 255),
        FieldSpec::required("phone_code", "Phone Code", 10),
        FieldSpec::optional("icon_flag_path", "Icon Flag Path", 255),
    ],
    searchable: &["name", "phone_code"],
    search_fields: &["name", "phone_code"],
    relation_fields: &["name", "phone_code"],
    relations: &[],
    natural_key: &["name"],
    default_sort: "name",
};

pub static PROVINCE: EntityDescriptor = EntityDescriptor {
    group: "region",
    segment: "provinces",
    title: "Provinces",
    table: "mst_provinces",
    fields: &[
        FieldSpec::required("country_id", "Country ID", 36),
        FieldSpec::required("name", "Name", 255),
        FieldSpec::required("code", "Code", 10),
        FieldSpec::optional("region_code", "Region Code", 10),
    ],
    searchable: &["name", "code"],
    search_fields: &["code", "name"],
    relation_fields: &["code", "name"],
    relations: &[RelationSpec {
        name: "country",
        field: "country_id",
        route: "by-country",
        target: &COUNTRY,
    }],
    natural_key: &["code"],
    default_sort: "name",
};

pub static CITY: EntityDescriptor = EntityDescriptor {
    group: "region",
    segment: "cities",
    title: "Cities",
    table: "mst_cities",
    fields: &[
        FieldSpec::required("province_id", "Province ID", 36),
        FieldSpec::required("name", "Name", 255),
        FieldSpec::required("code", "Code", 10),
    ],
    searchable: &["name", "code"],
    search_fields: &["code", "name"],
    relation_fields: &["code", "name"],
    relations: &[RelationSpec {
        name: "province",
        field: "province_id",
        route: "by-province",
        target: &PROVINCE,
    }],
    natural_key: &["code"],
    default_sort: "name",
};

pub static DISTRICT: EntityDescriptor = EntityDescriptor {
    group: "region",
    segment: "districts",
    title: "Districts",
    table: "mst_districts",
    fields: &[
        FieldSpec::required("city_id", "City ID", 36),
        FieldSpec::required("name", "Name", 255),
        FieldSpec::required("code", "Code", 10),
    ],
    searchable: &["name", "code"],
    search_fields: &["code", "name"],
    relation_fields: &["code", "name"],
    relations: &[RelationSpec {
        name: "city",
        field: "city_id",
        route: "by-city",
        target: &CITY,
    }],
    natural_key: &["code"],
    default_sort: "name",
};

pub static VILLAGE: EntityDescriptor = EntityDescriptor {
    group: "region",
    segment: "villages",
    title: "Villages",
    table: "mst_villages",
    fields: &[
        FieldSpec::required("district_id", "District ID", 36),
        FieldSpec::required("name", "Name", 255),
        FieldSpec::required("code", "Code", 15),
    ],
    searchable: &["name", "code"],
    search_fields: &["code", "name"],
    relation_fields: &["code", "name"],
    relations: &[RelationSpec {
        name: "district",
        field: "district_id",
        route: "by-district",
        target: &DISTRICT,
    }],
    natural_key: &["code"],
    default_sort: "name",
};

/// Parents before children, so seeding and migrations can follow this order.
pub static ALL: [&EntityDescriptor; 5] = [&COUNTRY, &PROVINCE, &CITY, &DISTRICT, &VILLAGE];
