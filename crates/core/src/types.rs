/// Company identities are UUIDs generated by the store.
pub type CompanyId = uuid::Uuid;
