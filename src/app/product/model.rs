//! 产品数据模型

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 产品记录
///
/// `id`、`name`、`price`、`quantity` 缺省时取零值；
/// 其余字段（如 `code_value`、`expiration`、`warehouse_id`）原样保留在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 显式的 `null` 与缺省字段一样取零值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price,
            quantity,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// 部分更新：空名称、零价格、零数量视为未设置
    pub fn merge_from(&mut self, patch: &Product) {
        if !patch.name.is_empty() {
            self.name = patch.name.clone();
        }
        if patch.price != 0.0 {
            self.price = patch.price;
        }
        if patch.quantity != 0 {
            self.quantity = patch.quantity;
        }
    }
}
