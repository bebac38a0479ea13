use clap::Parser;
use hair_scan::{analyzer, catalog_store, cli, config, error, export, history, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use hair_scan_common::{build_advisor_prompt, AdvisoryContext, ProductMatcher, UserProfile};
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = Config::load()?;
    if let Some(path) = cli.catalog.clone() {
        config.catalog_path = path;
    }
    let catalog = catalog_store::CatalogStore::new(&config.catalog_path);
    let log = history::ScanLog::new(&config.history_path);

    match cli.command {
        Commands::Analyze { image, save, output } => {
            println!("💇 hair-scan - 画像解析\n");

            let shared = catalog.get();
            let report = analyzer::analyze_file(&image, shared.as_deref())?;

            println!("✔ ダメージスコア: {:.1} ({})", report.score, report.level);
            println!("  {}", report.message);
            println!("  テクスチャ: {} / ケア: {} / 信頼度: {}%", report.detected_texture, report.care_level, report.confidence);
            println!(
                "  おすすめ: {}{}",
                report.recommended_product,
                if report.product_fallback { "（デフォルト）" } else { "" }
            );

            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("\n{}", json),
            }

            if save {
                let record = log.save(&report)?;
                println!("✔ 履歴に保存: {}", record.timestamp.to_rfc3339());
            }
        }

        Commands::Batch { folder, recursive, output, save } => {
            println!("📂 hair-scan - 一括解析\n");

            println!("[1/3] 画像をスキャン中...");
            let images = scanner::scan_folder_with_options(&folder, recursive)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            if images.is_empty() {
                return Err(error::HairScanError::NoImagesFound(folder.display().to_string()));
            }

            println!("[2/3] 解析中...");
            let shared = catalog.get();
            let outcome = analyzer::analyze_images(&images, shared.as_deref(), true);
            println!("✔ {}枚を解析（失敗 {}枚）\n", outcome.reports.len(), outcome.failures.len());

            for report in &outcome.reports {
                println!("  {:<32} {:>4.1}  {:<16} {}", report.file_name, report.score, report.level.as_str(), report.recommended_product);
            }
            for (file, e) in &outcome.failures {
                println!("  ✘ {}: {}", file, e);
            }

            println!("\n[3/3] 結果を保存中...");
            if let Some(path) = output {
                export::export_reports(&outcome.reports, &path)?;
                println!("✔ 結果を保存: {}", path.display());
            }
            if save {
                for report in &outcome.reports {
                    log.save(report)?;
                }
                println!("✔ 履歴に{}件保存", outcome.reports.len());
            }

            println!("\n✅ 一括解析完了");
        }

        Commands::Advise { hair_type, concern, damage_score, question } => {
            let shared = catalog.get();
            let matcher = ProductMatcher::new(shared.as_deref());
            let profile = UserProfile::new(hair_type, concern, damage_score);
            let context = AdvisoryContext::resolve(&matcher, profile, &config.brand);

            println!("✔ おすすめ: {}", context.display_name);
            match context.product.match_score {
                Some(score) => println!("  照合スコア: {}", score),
                None => println!("  該当なし（デフォルトプロファイル）"),
            }
            println!("  成分: {}", context.product.entry.key_ingredients);
            println!("  効果: {}", context.product.entry.benefit);

            if let Some(question) = question {
                println!("\n{}", build_advisor_prompt(&question, &context, &config.brand));
            }
        }

        Commands::Catalog { product } => {
            let shared = catalog.get().ok_or_else(|| {
                error::HairScanError::Catalog(format!("カタログを読み込めません: {}", catalog.path().display()))
            })?;

            match product {
                Some(name) => match shared.product_line(&name) {
                    Some(line) => {
                        println!("{}:", name);
                        for entry in line.shampoo.iter().chain(line.conditioner.iter()) {
                            println!("  [{}] {} / {} / {}", entry.product_type, entry.care_level, entry.key_ingredients, entry.benefit);
                        }
                    }
                    None => println!("商品が見つかりません: {}", name),
                },
                None => {
                    println!("商品カタログ: {} ({}件)", catalog.path().display(), shared.len());
                    for entry in shared.entries() {
                        println!(
                            "  {:<24} {:<12} code={:<2} {:<10} {}",
                            entry.product,
                            entry.product_type.as_str(),
                            entry.care_level_code.map(|c| c.to_string()).unwrap_or_else(|| "-".into()),
                            entry.hair_texture,
                            entry.hair_type
                        );
                    }
                }
            }
        }

        Commands::History => {
            let records = log.load();
            if records.is_empty() {
                println!("履歴がありません: {}", log.path().display());
            }
            for r in &records {
                println!("  {}  {:>4.1}  {:<16} {:<7} {}", r.timestamp.format("%Y-%m-%d %H:%M"), r.damage_score, r.level.as_str(), r.detected_texture.as_str(), r.recommended_product);
            }
        }

        Commands::Stats => {
            let stats = log.stats();
            println!("統計:");
            println!("  件数: {}", stats.total_scans);
            println!("  平均: {:.1}", stats.average);
            println!("  最良: {:.1}", stats.best);
            println!("  最悪: {:.1}", stats.worst);
            println!("  傾向: {}", stats.trend);
        }

        Commands::Compare => match log.comparison() {
            Some(c) => {
                println!("初回 ({}): {:.1}", c.first.timestamp.format("%Y-%m-%d %H:%M"), c.first.damage_score);
                println!("最新 ({}): {:.1}", c.latest.timestamp.format("%Y-%m-%d %H:%M"), c.latest.damage_score);
                println!("差分: {:+.2} ({})", c.delta, c.trend);
            }
            None => println!("比較には2件以上のスキャンが必要です"),
        },

        Commands::Insights => {
            let summary = log.insights();
            println!("💡 {}", summary.message);
            println!("  件数: {} / 平均: {:.1} / 傾向: {}", summary.stats.total_scans, summary.stats.average, summary.stats.trend);
            if let Some(product) = &summary.most_used_product {
                println!("  よく使う商品: {}", product);
            }
            if let Some(texture) = summary.most_common_texture {
                println!("  多いテクスチャ: {}", texture);
            }
        }

        Commands::Export { output } => {
            let records = log.load();
            export::excel::generate_history_excel(&records, &output)?;
            println!("✔ Excel出力: {} ({}件)", output.display(), records.len());
        }

        Commands::Config { show, set_catalog, set_history, set_brand } => {
            let mut config = Config::load_file()?;

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ カタログのパスを設定しました");
            }
            if let Some(path) = set_history {
                config.set_history_path(path)?;
                println!("✔ 履歴ファイルのパスを設定しました");
            }
            if let Some(brand) = set_brand {
                config.set_brand(brand)?;
                println!("✔ ブランド名を設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  カタログ: {}", config.catalog_path.display());
                println!("  履歴: {}", config.history_path.display());
                println!("  ブランド: {}", config.brand);
            }
        }
    }

    Ok(())
}
