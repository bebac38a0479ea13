//! アドバイス生成用コンテキスト
//!
//! 加点型照合の結果（なければデフォルトプロファイル）とユーザープロファイルをまとめ、
//! 外部の文章生成モデルに渡すプロンプトを組み立てる。生成モデルの呼び出しは対象外。

use crate::catalog::ProductCatalogEntry;
use crate::matcher::{advisory_default, MatchResult, ProductMatcher, UserProfile};
use serde::Serialize;

/// 生成モデルに渡す照合済みコンテキスト
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryContext {
    pub profile: UserProfile,
    pub product: MatchResult,
    /// 例: "Gliss Aqua Revive Conditioner"
    pub display_name: String,
}

impl AdvisoryContext {
    /// 加点型照合を行い、該当なしならデフォルトプロファイルで代替
    pub fn resolve(matcher: &ProductMatcher<'_>, profile: UserProfile, brand: &str) -> Self {
        let product = matcher
            .recommend_for_profile(&profile)
            .unwrap_or_else(|| MatchResult::from_default(advisory_default()));
        let display_name = display_name(brand, &product.entry);
        Self {
            profile,
            product,
            display_name,
        }
    }
}

/// ブランド名 + 商品名 + 種別
pub fn display_name(brand: &str, entry: &ProductCatalogEntry) -> String {
    [brand.trim(), entry.product.as_str(), entry.product_type.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// アドバイス生成プロンプト
///
/// # Arguments
/// * `question` - ユーザーの質問
/// * `context` - 照合済みコンテキスト
/// * `brand` - スタイリストが所属するブランド名
pub fn build_advisor_prompt(question: &str, context: &AdvisoryContext, brand: &str) -> String {
    let profile = &context.profile;
    let entry = &context.product.entry;

    format!(
        r#"You are Maya, a professional hair stylist for {brand}.

STRICT RULES:
1. Write in plain conversational text ONLY - NO emojis, NO special characters
2. Keep response to 3-4 sentences maximum
3. ALWAYS mention the exact product name provided below
4. Be warm, helpful, and natural like a friend giving advice
5. End with one practical tip

USER PROFILE:
- Hair Type: {hair_type}
- Damage Level: {damage_score}/10
- Main Concern: {concern}

MATCHED PRODUCT FOR USER:
Product: {product}
Key Ingredients: {ingredients}
Benefit: {benefit}
Care Level: {care_level}
Hair Texture: {texture}
Purpose: {need_state}

YOU MUST mention this specific product by its full name in your response.

USER QUESTION: {question}

Remember: You MUST reference the recommended product by its full name when answering."#,
        hair_type = profile.hair_type,
        damage_score = profile.damage_score,
        concern = profile.concern,
        product = context.display_name,
        ingredients = entry.key_ingredients,
        benefit = entry.benefit,
        care_level = entry.care_level,
        texture = entry.hair_texture,
        need_state = entry.need_state,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductCatalog, ProductType};

    #[test]
    fn test_resolve_without_catalog_uses_default_profile() {
        let matcher = ProductMatcher::new(None);
        let ctx = AdvisoryContext::resolve(&matcher, UserProfile::new("Curly", "Dryness", 8.0), "Gliss");

        assert!(ctx.product.fallback);
        assert_eq!(ctx.display_name, "Gliss Aqua Revive Conditioner");
        assert_eq!(ctx.product.entry.benefit, "Seals Moisture");
    }

    #[test]
    fn test_resolve_with_catalog_match() {
        let mut entry = ProductCatalogEntry::new("Oil Nutritive", ProductType::Conditioner);
        entry.hair_type = "Dry, Damaged".to_string();
        entry.care_level = "Medium".to_string();
        let catalog = ProductCatalog::new(vec![entry]);
        let matcher = ProductMatcher::new(Some(&catalog));

        let ctx = AdvisoryContext::resolve(&matcher, UserProfile::new("dry", "frizz", 5.0), "");
        assert!(!ctx.product.fallback);
        // dry(+3) + damaged(+3) + Medium(+4) + Conditioner(+1)
        assert_eq!(ctx.product.match_score, Some(11));
        assert_eq!(ctx.display_name, "Oil Nutritive Conditioner");
    }

    #[test]
    fn test_prompt_mentions_profile_and_product() {
        let matcher = ProductMatcher::new(None);
        let ctx = AdvisoryContext::resolve(&matcher, UserProfile::new("Fine", "Shine", 2.5), "Gliss");
        let prompt = build_advisor_prompt("Should I use conditioner daily?", &ctx, "Gliss");

        assert!(prompt.contains("Hair Type: Fine"));
        assert!(prompt.contains("Damage Level: 2.5/10"));
        assert!(prompt.contains("Product: Gliss Aqua Revive Conditioner"));
        assert!(prompt.contains("USER QUESTION: Should I use conditioner daily?"));
    }
}
