use structopt::StructOpt;
use tracing::info;

use vlm_eval::config::{EvalConfig, Opts};
use vlm_eval::resources::PyResources;
use vlm_eval::utils::init_tracing;
use vlm_eval::{answer_questions, load_vqa_dataset, MediaLoader};

// cargo run --features python --bin eval_vqa -- --cfg-path [CONFIG_PATH]
fn main() -> anyhow::Result<()> {
    init_tracing();
    let opt = Opts::from_args();
    let config = EvalConfig::from_path(&opt.cfg_path)?;

    let datasets = config.vqa_datasets
        .iter()
        .map(load_vqa_dataset)
        .collect::<vlm_eval::Result<Vec<_>>>()?;

    let resources = PyResources::new(config.setup_config(false))?;
    let loader = MediaLoader::from_config(&config.processors);

    let mut accuracies = Vec::with_capacity(datasets.len());
    for dataset in datasets.iter() {
        let accuracy = answer_questions(&resources, &loader, dataset)?.accuracy()?;
        info!(dataset = dataset.name(), accuracy, "vqa evaluation done");
        accuracies.push(accuracy.to_string());
    }
    println!("{}", accuracies.join(" "));
    Ok(())
}
