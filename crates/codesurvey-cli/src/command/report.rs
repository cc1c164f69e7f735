use std::path::PathBuf;

use codesurvey_analysis::report::assemble_session;

use crate::util::{Output, read_survey_file};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Survey export JSON file
    input: PathBuf,
    /// Language to resolve translated names in; defaults to the export's
    /// selected language
    #[arg(long)]
    lang: Option<String>,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let survey = read_survey_file(&arg.input)?;
    let selected_lang = arg.lang.as_deref().unwrap_or(&survey.selected_lang);

    let question_count = survey
        .sections
        .iter()
        .map(|section| section.questions.len())
        .sum::<usize>();
    eprintln!(
        "Aggregating {} questions in {} sections over {} code samples...",
        question_count,
        survey.sections.len(),
        survey.code_samples.len()
    );

    let session = assemble_session(
        &survey.sections,
        &survey.answers,
        &survey.code_samples,
        selected_lang,
    )?;
    eprintln!("Report assembled");

    Output::save_json(&session, arg.output.clone())?;
    Ok(())
}
