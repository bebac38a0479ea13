//! 照合できなかった場合の固定デフォルト商品

use crate::catalog::{ProductCatalogEntry, ProductType};
use crate::types::CareLevel;

/// 評価フローのデフォルト（スコア < 3 / < 7 / それ以上）
pub fn assessment_default(score: f64) -> ProductCatalogEntry {
    let (product, key_ingredients, benefit) = if score < 3.0 {
        ("Aqua Revive", "Marine Algae, Hyaluron Complex", "Seals Moisture")
    } else if score < 7.0 {
        ("Oil Nutritive", "Marula Oil, Omega 9", "Controls Water Loss")
    } else {
        ("Ultimate Repair", "Black Pearl, Liquid Keratin", "Repairing Damage")
    };

    let mut entry = ProductCatalogEntry::new(product, ProductType::Shampoo);
    entry.key_ingredients = key_ingredients.to_string();
    entry.benefit = benefit.to_string();
    entry
}

/// アドバイスフローのデフォルトプロファイル
pub fn advisory_default() -> ProductCatalogEntry {
    let mut entry = ProductCatalogEntry::new("Aqua Revive", ProductType::Conditioner);
    entry.care_level_code = Some(CareLevel::Gentle.code());
    entry.care_level = CareLevel::Gentle.to_string();
    entry.hair_texture = "Fine".to_string();
    entry.key_ingredients = "Marine Algae, Hyaluron Complex".to_string();
    entry.benefit = "Seals Moisture".to_string();
    entry.need_state = "Moisture".to_string();
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_default_bands() {
        assert_eq!(assessment_default(0.0).product, "Aqua Revive");
        assert_eq!(assessment_default(2.99).product, "Aqua Revive");
        assert_eq!(assessment_default(3.0).product, "Oil Nutritive");
        assert_eq!(assessment_default(6.99).benefit, "Controls Water Loss");
        assert_eq!(assessment_default(7.0).key_ingredients, "Black Pearl, Liquid Keratin");
    }

    #[test]
    fn test_advisory_default_is_gentle_conditioner() {
        let entry = advisory_default();
        assert_eq!(entry.product_type, ProductType::Conditioner);
        assert_eq!(entry.care_level, "Gentle");
        assert_eq!(entry.need_state, "Moisture");
    }
}
