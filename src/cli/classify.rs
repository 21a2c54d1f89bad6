use crate::classifier::Classifier;
use crate::errors::VigilError;
use super::commands::ClassifyArgs;

pub async fn handle_classify(args: ClassifyArgs) -> Result<(), VigilError> {
    let classifier = Classifier::new();
    let result = classifier.classify(&args.text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("suspicious: {}", result.is_suspicious);
        println!("risk:       {:.0}%", result.risk_score * 100.0);
        let triggers = result.trigger_summary();
        println!("triggers:   {}", if triggers.is_empty() { "—".to_string() } else { triggers });
    }
    Ok(())
}
