use marketmood_core::domain::article::ScoredArticle;
use marketmood_core::domain::snapshot::AnalysisSnapshot;

const WIDTH: usize = 70;

pub fn print_snapshot(snapshot: &AnalysisSnapshot, max_display: usize) {
    header(&format!(
        "Sentiment analysis: {} / \"{}\"",
        snapshot.ticker, snapshot.keyword
    ));

    section("Stock data");
    match &snapshot.quote {
        Some(quote) => {
            println!("  Current price:   {:>12.2}", quote.current);
            println!("  Previous close:  {:>12.2}", quote.previous_close);
            println!(
                "  Change:          {:>+12.2} ({:+.2}%)",
                quote.daily_change, quote.daily_change_pct
            );
            println!("  High (today):    {:>12.2}", quote.day_high);
            println!("  Low (today):     {:>12.2}", quote.day_low);
            println!("  Open (today):    {:>12.2}", quote.day_open);
        }
        None => println!("  Stock data unavailable."),
    }

    section("Articles");
    if snapshot.articles.is_empty() {
        println!(
            "  No articles were scored ({} fetched).",
            snapshot.article_count
        );
    } else {
        let shown = max_display.min(snapshot.articles.len());
        for (idx, scored) in snapshot.articles.iter().take(shown).enumerate() {
            println!(
                "  {:>3}. [{}] {:+.4}  {}",
                idx + 1,
                scored.sentiment.label,
                scored.sentiment.signed_score,
                scored.article.title
            );
            if !scored.article.published_at.is_empty() {
                println!("       {}", scored.article.published_at);
            }
        }
        if snapshot.articles.len() > shown {
            println!(
                "  ... and {} more (see the JSON export for the full list)",
                snapshot.articles.len() - shown
            );
        }
    }

    section("Summary");
    let (positive, negative, neutral) = distribution(snapshot);
    println!("  Articles fetched:  {}", snapshot.article_count);
    println!("  Articles scored:   {}", snapshot.articles.len());
    println!(
        "  Overall sentiment: {}  (average score {:+.4})",
        snapshot.aggregate.label, snapshot.aggregate.average_score
    );
    println!("  Distribution:      {positive} positive / {negative} negative / {neutral} neutral");

    let (top_positive, top_negative) = highlights(snapshot);
    if let Some(scored) = top_positive {
        println!(
            "  Top positive:      [{:+.3}] {}",
            scored.sentiment.signed_score, scored.article.title
        );
    }
    if let Some(scored) = top_negative {
        println!(
            "  Top negative:      [{:+.3}] {}",
            scored.sentiment.signed_score, scored.article.title
        );
    }

    // "N/A" is deliberate: no quote means no basis for an action, which is
    // not the same statement as HOLD.
    match snapshot.recommendation {
        Some(rec) => println!("  Recommendation:    {rec}"),
        None => println!("  Recommendation:    N/A (no stock data)"),
    }

    println!("{}", "=".repeat(WIDTH));
}

fn distribution(snapshot: &AnalysisSnapshot) -> (usize, usize, usize) {
    let positive = snapshot
        .articles
        .iter()
        .filter(|s| s.sentiment.signed_score > 0.0)
        .count();
    let negative = snapshot
        .articles
        .iter()
        .filter(|s| s.sentiment.signed_score < 0.0)
        .count();
    let neutral = snapshot.articles.len() - positive - negative;
    (positive, negative, neutral)
}

fn highlights(snapshot: &AnalysisSnapshot) -> (Option<&ScoredArticle>, Option<&ScoredArticle>) {
    let mut top_positive: Option<&ScoredArticle> = None;
    let mut top_negative: Option<&ScoredArticle> = None;
    for scored in &snapshot.articles {
        let score = scored.sentiment.signed_score;
        if score > 0.0 && top_positive.map_or(true, |s| score > s.sentiment.signed_score) {
            top_positive = Some(scored);
        }
        if score < 0.0 && top_negative.map_or(true, |s| score < s.sentiment.signed_score) {
            top_negative = Some(scored);
        }
    }
    (top_positive, top_negative)
}

fn header(title: &str) {
    let border = "=".repeat(WIDTH);
    println!("\n{border}");
    println!("{title:^width$}", width = WIDTH);
    println!("{border}");
}

fn section(title: &str) {
    println!("\n{}", "-".repeat(WIDTH));
    println!("  {title}");
    println!("{}", "-".repeat(WIDTH));
}
