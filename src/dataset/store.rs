use crate::dataset::normalize::{clean_text, normalize_ingredient_list};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: String,
    pub method: String,
}

/// Logical field to CSV column mapping. Column names vary between pipeline
/// stages, so the dataset store never hardcodes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub name: String,
    pub ingredients: String,
    pub method: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            ingredients: "text_ingradiant".to_string(),
            method: "food_method".to_string(),
        }
    }
}

/// Ordered, immutable recipe table. Built once per run; a reload replaces it
/// wholesale.
#[derive(Debug, Clone)]
pub struct RecipeTable {
    recipes: Vec<Recipe>,
}

impl RecipeTable {
    /// Load recipes from a CSV file.
    ///
    /// Normalizes every field, removes duplicate names keeping the first
    /// occurrence and re-indexes contiguously from zero. This is the only
    /// place row identity is established.
    pub fn load(path: impl AsRef<Path>, columns: &ColumnMapping) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let name_idx = headers.iter().position(|h| h == columns.name);
        let ingredients_idx = headers.iter().position(|h| h == columns.ingredients);
        let method_idx = headers.iter().position(|h| h == columns.method);

        let missing: Vec<String> = [
            (name_idx, &columns.name),
            (ingredients_idx, &columns.ingredients),
            (method_idx, &columns.method),
        ]
        .iter()
        .filter(|(idx, _)| idx.is_none())
        .map(|(_, col)| col.to_string())
        .collect();

        if !missing.is_empty() {
            return Err(Error::Schema { missing });
        }

        let (name_idx, ingredients_idx, method_idx) = (
            name_idx.unwrap(),
            ingredients_idx.unwrap(),
            method_idx.unwrap(),
        );

        let mut recipes = Vec::new();
        let mut seen = HashSet::new();

        for record in reader.records() {
            let record = record?;

            let name = clean_text(record.get(name_idx).unwrap_or(""));
            let ingredients = normalize_ingredient_list(record.get(ingredients_idx).unwrap_or(""));
            let method = clean_text(record.get(method_idx).unwrap_or(""));

            // First occurrence wins
            if !seen.insert(name.clone()) {
                debug!("Dropping duplicate recipe: {}", name);
                continue;
            }

            recipes.push(Recipe {
                name,
                ingredients,
                method,
            });
        }

        info!("Loaded {} recipes from {:?}", recipes.len(), path);

        Ok(Self { recipes })
    }

    /// Write the table back out as CSV, using the given column names for the
    /// header. Used by the preprocessing command.
    pub fn write_csv(&self, path: impl AsRef<Path>, columns: &ColumnMapping) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;

        writer.write_record([&columns.name, &columns.ingredients, &columns.method])?;
        for recipe in &self.recipes {
            writer.write_record([&recipe.name, &recipe.ingredients, &recipe.method])?;
        }
        writer.flush()?;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// SHA256 over the normalized rows in table order. Keys the embedding
    /// cache artifact so a changed dataset never serves stale vectors.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for recipe in &self.recipes {
            hasher.update(recipe.name.as_bytes());
            hasher.update([0u8]);
            hasher.update(recipe.ingredients.as_bytes());
            hasher.update([0u8]);
            hasher.update(recipe.method.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    #[cfg(test)]
    pub(crate) fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_normalizes_and_reindexes() {
        let file = write_csv(
            "name,text_ingradiant,food_method\n\
             ผัดกะเพรา  ไก่,\"ไก่สับ\nกะเพรา\",\"ผัดให้หอม   แล้วปรุงรส\"\n",
        );

        let table = RecipeTable::load(file.path(), &ColumnMapping::default()).unwrap();
        assert_eq!(table.len(), 1);

        let recipe = table.get(0).unwrap();
        assert_eq!(recipe.name, "ผัดกะเพรา ไก่");
        assert_eq!(recipe.ingredients, "- ไก่สับ\n- กะเพรา");
        assert_eq!(recipe.method, "ผัดให้หอม แล้วปรุงรส");
    }

    #[test]
    fn test_load_missing_file() {
        let result = RecipeTable::load("/nonexistent/recipes.csv", &ColumnMapping::default());
        assert!(matches!(result, Err(Error::MissingFile(_))));
    }

    #[test]
    fn test_load_reports_all_missing_columns() {
        let file = write_csv("name,other\nแกงส้ม,x\n");

        let result = RecipeTable::load(file.path(), &ColumnMapping::default());
        match result {
            Err(Error::Schema { missing }) => {
                assert_eq!(missing, vec!["text_ingradiant", "food_method"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_deduplicates_by_name_keeping_first() {
        let file = write_csv(
            "name,text_ingradiant,food_method\n\
             ต้มยำกุ้ง,กุ้ง,ต้ม\n\
             ต้มยำกุ้ง,กุ้งแม่น้ำ,ต้มนาน\n\
             แกงเขียวหวาน,ไก่,แกง\n",
        );

        let table = RecipeTable::load(file.path(), &ColumnMapping::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().ingredients, "- กุ้ง");
        assert_eq!(table.get(1).unwrap().name, "แกงเขียวหวาน");
    }

    #[test]
    fn test_load_with_custom_column_mapping() {
        let file = write_csv("ชื่อเมนู,ส่วนผสม,วิธีทำ\nไข่เจียว,ไข่ไก่,ทอด\n");

        let columns = ColumnMapping {
            name: "ชื่อเมนู".to_string(),
            ingredients: "ส่วนผสม".to_string(),
            method: "วิธีทำ".to_string(),
        };

        let table = RecipeTable::load(file.path(), &columns).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).unwrap().name, "ไข่เจียว");
    }

    #[test]
    fn test_content_hash_tracks_rows() {
        let file = write_csv("name,text_ingradiant,food_method\nก,ข,ค\n");
        let table = RecipeTable::load(file.path(), &ColumnMapping::default()).unwrap();

        let other = write_csv("name,text_ingradiant,food_method\nก,ข,ง\n");
        let other_table = RecipeTable::load(other.path(), &ColumnMapping::default()).unwrap();

        assert_eq!(table.content_hash().len(), 64);
        assert_eq!(table.content_hash(), table.content_hash());
        assert_ne!(table.content_hash(), other_table.content_hash());
    }

    #[test]
    fn test_write_csv_round_trip() {
        let file = write_csv(
            "name,text_ingradiant,food_method\n\
             ผัดไทย,\"เส้นจันท์\nถั่วงอก\",ผัด\n",
        );
        let table = RecipeTable::load(file.path(), &ColumnMapping::default()).unwrap();

        let out = NamedTempFile::new().unwrap();
        table.write_csv(out.path(), &ColumnMapping::default()).unwrap();

        let reloaded = RecipeTable::load(out.path(), &ColumnMapping::default()).unwrap();
        assert_eq!(reloaded.recipes(), table.recipes());
    }
}
