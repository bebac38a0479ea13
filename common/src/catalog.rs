//! 商品カタログモジュール
//!
//! 表形式の商品カタログ（ヘッダー行 + データ行）を管理する。
//! ファイル形式（xlsx/csv）の読み込みは呼び出し側の責務で、
//! ここではセル文字列の表からエントリを構築する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const BOM: char = '\u{FEFF}';

/// カタログの既知の列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogColumn {
    Product,
    ProductType,
    CareLevelCode,
    CareLevel,
    HairTexture,
    HairType,
    PrimaryConcern,
    SecondaryConcern,
    KeyIngredients,
    Benefit,
    NeedState,
    Size,
    Goal,
    Fragrance,
}

impl CatalogColumn {
    pub const ALL: [CatalogColumn; 14] = [
        CatalogColumn::Product,
        CatalogColumn::ProductType,
        CatalogColumn::CareLevelCode,
        CatalogColumn::CareLevel,
        CatalogColumn::HairTexture,
        CatalogColumn::HairType,
        CatalogColumn::PrimaryConcern,
        CatalogColumn::SecondaryConcern,
        CatalogColumn::KeyIngredients,
        CatalogColumn::Benefit,
        CatalogColumn::NeedState,
        CatalogColumn::Size,
        CatalogColumn::Goal,
        CatalogColumn::Fragrance,
    ];

    /// ヘッダー行での列名
    pub fn header(&self) -> &'static str {
        match self {
            CatalogColumn::Product => "Product",
            CatalogColumn::ProductType => "Product Type",
            CatalogColumn::CareLevelCode => "Care Level Code",
            CatalogColumn::CareLevel => "Care Level",
            CatalogColumn::HairTexture => "Hair Texture",
            CatalogColumn::HairType => "Hair Type",
            CatalogColumn::PrimaryConcern => "Primary Concern",
            CatalogColumn::SecondaryConcern => "Secondary Concern",
            CatalogColumn::KeyIngredients => "Key Ingredients",
            CatalogColumn::Benefit => "Benefit from Ingredient",
            CatalogColumn::NeedState => "Need State",
            CatalogColumn::Size => "Size",
            CatalogColumn::Goal => "Goal",
            CatalogColumn::Fragrance => "Fragrance",
        }
    }

    fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl std::fmt::Display for CatalogColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// 商品種別
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    Shampoo,
    Conditioner,
    Other(String),
}

impl ProductType {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("shampoo") {
            ProductType::Shampoo
        } else if value.eq_ignore_ascii_case("conditioner") {
            ProductType::Conditioner
        } else {
            ProductType::Other(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProductType::Shampoo => "Shampoo",
            ProductType::Conditioner => "Conditioner",
            ProductType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ミネラル配合フラグ（既知の列以外はすべてフラグ列として扱う）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineralFlag {
    pub name: String,
    pub present: bool,
}

/// カタログの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCatalogEntry {
    pub product: String,
    pub product_type: ProductType,
    /// 1/2/3（解釈できない値は None）
    pub care_level_code: Option<u8>,
    pub care_level: String,
    pub hair_texture: String,
    pub hair_type: String,
    pub primary_concern: String,
    pub secondary_concern: String,
    pub key_ingredients: String,
    pub benefit: String,
    pub need_state: String,
    pub size: String,
    pub goal: String,
    pub fragrance: String,
    #[serde(default)]
    pub minerals: Vec<MineralFlag>,
}

impl ProductCatalogEntry {
    /// 商品名と種別だけを持つエントリ（他は空）
    pub fn new(product: impl Into<String>, product_type: ProductType) -> Self {
        Self {
            product: product.into(),
            product_type,
            care_level_code: None,
            care_level: String::new(),
            hair_texture: String::new(),
            hair_type: String::new(),
            primary_concern: String::new(),
            secondary_concern: String::new(),
            key_ingredients: String::new(),
            benefit: String::new(),
            need_state: String::new(),
            size: String::new(),
            goal: String::new(),
            fragrance: String::new(),
            minerals: Vec::new(),
        }
    }

    /// 指定したミネラルが配合されているか
    pub fn has_mineral(&self, name: &str) -> bool {
        self.minerals
            .iter()
            .any(|m| m.present && m.name.eq_ignore_ascii_case(name))
    }
}

/// 同名商品のシャンプー/コンディショナー
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductLine<'a> {
    pub shampoo: Vec<&'a ProductCatalogEntry>,
    pub conditioner: Vec<&'a ProductCatalogEntry>,
}

/// 商品カタログ（読み込み後は不変）
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    /// 挿入順を保持
    entries: Vec<ProductCatalogEntry>,
    /// ヘッダーに存在した既知の列
    columns: HashSet<CatalogColumn>,
}

impl ProductCatalog {
    /// 全列が揃っている前提でエントリから構築
    pub fn new(entries: Vec<ProductCatalogEntry>) -> Self {
        Self {
            entries,
            columns: CatalogColumn::ALL.into_iter().collect(),
        }
    }

    /// ヘッダー + データ行の表から構築
    ///
    /// ヘッダー名は前後の空白を除去して照合する。
    /// Product 列がない表は不正として扱う。
    pub fn from_table(headers: &[String], rows: &[Vec<String>]) -> Result<Self> {
        if headers.iter().all(|h| h.trim_start_matches(BOM).trim().is_empty()) {
            return Err(Error::Catalog("ヘッダー行がありません".into()));
        }

        let mut known: HashMap<CatalogColumn, usize> = HashMap::new();
        let mut mineral_columns: Vec<(usize, String)> = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            // Excel が出力する CSV は先頭に BOM が付く
            let header = header.trim_start_matches(BOM).trim();
            if header.is_empty() {
                continue;
            }
            match CatalogColumn::from_header(header) {
                Some(column) => {
                    known.entry(column).or_insert(index);
                }
                None => mineral_columns.push((index, header.to_string())),
            }
        }

        if !known.contains_key(&CatalogColumn::Product) {
            return Err(Error::Catalog("Product 列がありません".into()));
        }

        let mut entries = Vec::new();
        for row in rows {
            let cell = |column: CatalogColumn| -> String {
                known
                    .get(&column)
                    .and_then(|&i| row.get(i))
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            };

            let product = cell(CatalogColumn::Product);
            if product.is_empty() {
                continue;
            }

            let minerals = mineral_columns
                .iter()
                .map(|(i, name)| MineralFlag {
                    name: name.clone(),
                    present: row
                        .get(*i)
                        .map(|v| v.trim().eq_ignore_ascii_case("yes"))
                        .unwrap_or(false),
                })
                .collect();

            entries.push(ProductCatalogEntry {
                product,
                product_type: ProductType::parse(&cell(CatalogColumn::ProductType)),
                care_level_code: parse_care_level_code(&cell(CatalogColumn::CareLevelCode)),
                care_level: cell(CatalogColumn::CareLevel),
                hair_texture: cell(CatalogColumn::HairTexture),
                hair_type: cell(CatalogColumn::HairType),
                primary_concern: cell(CatalogColumn::PrimaryConcern),
                secondary_concern: cell(CatalogColumn::SecondaryConcern),
                key_ingredients: cell(CatalogColumn::KeyIngredients),
                benefit: cell(CatalogColumn::Benefit),
                need_state: cell(CatalogColumn::NeedState),
                size: cell(CatalogColumn::Size),
                goal: cell(CatalogColumn::Goal),
                fragrance: cell(CatalogColumn::Fragrance),
                minerals,
            });
        }

        Ok(Self {
            entries,
            columns: known.into_keys().collect(),
        })
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut records = parse_csv(content.trim_start_matches(BOM))?.into_iter();
        let headers = match records.next() {
            Some(record) => record,
            None => return Err(Error::Catalog("CSVが空です".into())),
        };
        let rows: Vec<Vec<String>> = records.collect();
        Self::from_table(&headers, &rows)
    }

    /// 全エントリ（挿入順）
    pub fn entries(&self) -> &[ProductCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ヘッダーに存在しなかった列を返す
    pub fn missing_columns(&self, required: &[CatalogColumn]) -> Vec<CatalogColumn> {
        required
            .iter()
            .copied()
            .filter(|c| !self.columns.contains(c))
            .collect()
    }

    /// 商品名でシャンプー/コンディショナーを検索
    pub fn product_line(&self, product: &str) -> Option<ProductLine<'_>> {
        if !self.entries.iter().any(|e| e.product == product) {
            return None;
        }

        let mut line = ProductLine::default();
        for entry in self.entries.iter().filter(|e| e.product == product) {
            match entry.product_type {
                ProductType::Shampoo => line.shampoo.push(entry),
                ProductType::Conditioner => line.conditioner.push(entry),
                ProductType::Other(_) => {}
            }
        }
        Some(line)
    }
}

/// "2" / "2.0" / 2.0 を受け付ける
fn parse_care_level_code(value: &str) -> Option<u8> {
    let value: f64 = value.trim().parse().ok()?;
    if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
        return None;
    }
    Some(value as u8)
}

/// CSVをレコード単位でパース（ダブルクォート・""エスケープ・引用符内の改行に対応）
///
/// 空行は読み飛ばす。引用符が閉じられていない場合はエラー。
fn parse_csv(content: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => record.push(take_field(&mut field)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                record.push(take_field(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Catalog("引用符が閉じられていません".into()));
    }

    // 末尾に改行がない最後のレコード
    if !field.is_empty() || !record.is_empty() {
        record.push(take_field(&mut field));
        push_record(&mut records, record);
    }
    Ok(records)
}

fn take_field(field: &mut String) -> String {
    let value = field.trim().to_string();
    field.clear();
    value
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    if record.iter().any(|f| !f.is_empty()) {
        records.push(record);
    }
}
