//! Player wizards

use datastore::prelude::*;

use super::validation::ValidationErrors;

pub const TABLE: &str = "Wizards";

pub const MALE: &str = "M";
pub const FEMALE: &str = "F";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wizard {
    #[serde(flatten)]
    pub base: BaseRecord,
    /// Key of the owning [`User`](super::User)
    #[serde(rename = "OwnerID")]
    pub owner_id: u64,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl Wizard {
    pub fn new(name: &str, sex: &str, owner_id: u64) -> Self {
        Self {
            owner_id,
            sex: sex.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> u64 {
        self.base.id
    }
}

impl Record for Wizard {
    fn columns() -> Vec<Column> {
        let mut columns = BaseRecord::columns();
        columns.extend([
            Column::integer("OwnerID"),
            Column::text("Sex"),
            Column::text("Name"),
        ]);
        columns
    }

    datastore::delegate_base_record!(base);
}

/// Data access for [`Wizard`] records
#[derive(Debug, Clone, Copy)]
pub struct WizardDao<'a> {
    store: &'a DataStore,
}

impl<'a> WizardDao<'a> {
    pub fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Option<Wizard>, DataStoreError> {
        self.store.get("ID = ?", &[id.into()]).await
    }

    pub async fn get_by_owner_id(&self, owner_id: u64) -> Result<Vec<Wizard>, DataStoreError> {
        self.store.select("OwnerID = ?", &[owner_id.into()]).await
    }

    pub async fn get_by_name_and_owner_id(
        &self,
        name: &str,
        owner_id: u64,
    ) -> Result<Option<Wizard>, DataStoreError> {
        self.store
            .get("Name = ? AND OwnerID = ?", &[name.into(), owner_id.into()])
            .await
    }

    pub async fn insert(&self, wizard: &mut Wizard) -> Result<(), DataStoreError> {
        self.store.insert(wizard).await
    }

    pub async fn update(&self, wizard: &mut Wizard) -> Result<(), DataStoreError> {
        self.store.update(wizard).await
    }

    pub async fn delete(&self, wizard: &mut Wizard) -> Result<(), DataStoreError> {
        self.store.delete(wizard).await
    }
}

/// Checks a [`Wizard`] before it is saved
#[derive(Debug, Clone, Copy)]
pub struct WizardValidator<'a> {
    dao: WizardDao<'a>,
}

impl<'a> WizardValidator<'a> {
    pub fn new(dao: WizardDao<'a>) -> Self {
        Self { dao }
    }

    pub async fn validate(&self, wizard: &Wizard) -> Result<ValidationErrors, DataStoreError> {
        let mut errors = ValidationErrors::new();

        if wizard.sex != MALE && wizard.sex != FEMALE {
            errors.add("Sex", "Must be either male or female.");
        }

        if wizard.name.is_empty() {
            errors.add("Name", "This field cannot be empty.");
        }

        let saved = self
            .dao
            .get_by_name_and_owner_id(&wizard.name, wizard.owner_id)
            .await?;
        if saved.is_some_and(|saved| saved.id() != wizard.id()) {
            errors.add("Name", "A wizard with this name already exists.");
        }

        Ok(errors)
    }
}
