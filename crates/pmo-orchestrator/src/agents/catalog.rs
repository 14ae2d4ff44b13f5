//! The default agent catalog.
//!
//! Prompt builders live here as plain functions so the catalog is data: a
//! name, a builder, and a model picked from the mapping. Adding an agent is
//! one function and one line in `build_catalog`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agents::{BrandKitBot, PromptAgent, ScheduleCopilot, StakeholderGraphBot};
use crate::router::LlmRouter;
use crate::{payload_str, Agent, EventPayload};

/// Model used when the mapping has no entry for an agent.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

fn market_intel(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "");
    let country = payload_str(payload, "country", "Brazil");
    format!(
        "You are a market analyst.\n\
         Produce a market analysis for the project \"{name}\" in {country}:\n\n\
         - Market size (TAM/SAM/SOM where possible)\n\
         - Growth trends\n\
         - Relevant competitors\n\
         - Regulations and entry challenges\n\
         - Opportunities and threats\n\n\
         Format the answer in clear sections with bullets."
    )
}

fn risk_sentinel(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "");
    format!(
        "You are a corporate risk analyst.\n\
         List and assess the main risks of the project \"{name}\":\n\n\
         - Technical, market, financial, regulatory and operational risks\n\
         - Probability and impact on a qualitative scale (low/medium/high)\n\
         - Recommended mitigation plan\n\n\
         Format the answer as a table or bullets."
    )
}

fn compliance_guardian(payload: &EventPayload) -> String {
    let country = payload_str(payload, "country", "Brazil");
    let project_type = payload_str(payload, "project_type", "unknown");
    format!(
        "You are a compliance specialist.\n\
         Analyze which laws, regulations and conformity standards apply to a \
         \"{project_type}\" project in {country}.\n\n\
         - List the main applicable norms.\n\
         - Compliance risks and potential penalties.\n\
         - Good practices to mitigate them (internal policies, training, audits).\n\
         - Format as topics."
    )
}

fn go_to_market(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "");
    format!(
        "You are a go-to-market strategist.\n\
         Draft a GTM plan for the project \"{name}\" covering:\n\n\
         - Priority customer segments\n\
         - Value proposition per segment\n\
         - Acquisition channels (organic, paid, partnerships)\n\
         - Initial pricing strategy\n\
         - Success metrics and first experiments"
    )
}

fn org_designer(payload: &EventPayload) -> String {
    let team = payload
        .get("team_capacity")
        .map_or_else(|| "[]".to_string(), ToString::to_string);
    format!(
        "You are an organizational design consultant.\n\
         Given a team with these roles and capacities: {team}\n\n\
         - Propose a minimal organizational structure for the project.\n\
         - Define responsibilities per role (summarized RACI).\n\
         - Suggest communication and reporting processes."
    )
}

fn fin_modeler(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "Unnamed project");
    let project_type = payload_str(payload, "project_type", "unknown");
    format!(
        "You are an experienced financial analyst.\n\
         Build a financial viability summary for the project \"{name}\" (type: {project_type}).\n\n\
         1. List the main assumptions (price, CAC, churn).\n\
         2. Project revenue and cost over 12 and 36 months.\n\
         3. Estimate LTV, CAC payback, gross margin and break-even point.\n\
         4. Present financial risks and mitigation strategies.\n\
         5. Format as concise topics.\n\n\
         If you need to assume values, be realistic and transparent about them."
    )
}

fn decision_supporter(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "Project");
    let project_type = payload_str(payload, "project_type", "undefined");
    let decision = payload_str(payload, "decision", "");
    format!(
        "You are a strategic decision advisor for the project \"{name}\" (type: {project_type}).\n\
         Analyze the following decision: {decision}\n\n\
         - Pros and cons\n\
         - Key risks of each option\n\
         - A clear recommendation with its rationale"
    )
}

fn comm_plan(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "");
    let project_type = payload_str(payload, "project_type", "unknown");
    format!(
        "Act as a communications manager.\n\
         For a project named \"{name}\" of type \"{project_type}\", create an \
         initial communication plan in Markdown.\n\n\
         The plan must include:\n\
         1. Communication objective, in one clear sentence.\n\
         2. Target audiences, listing the three main stakeholders.\n\
         3. Channels and frequency per audience.\n\
         4. Key messages per audience."
    )
}

fn doc_checklist(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "");
    let project_type = payload_str(payload, "project_type", "unknown");
    let country = payload_str(payload, "country", "Brazil");
    format!(
        "Act as an experienced project consultant.\n\
         For a project named \"{name}\" of type \"{project_type}\" to be run in \
         \"{country}\", create a Markdown checklist of the main documents needed \
         through the project lifecycle.\n\n\
         Organize the checklist into:\n\
         1. Initiation and planning documents.\n\
         2. Contractual and legal documents.\n\
         3. Execution and control documents.\n\
         4. Closure documents."
    )
}

fn process_mapper(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "");
    let project_type = payload_str(payload, "project_type", "unknown");
    let process = payload_str(payload, "process_name", "onboarding");
    format!(
        "Act as a business process analyst.\n\
         For a project named \"{name}\" of type \"{project_type}\", draw a simple \
         flowchart for the \"{process}\" process.\n\n\
         Use Mermaid flowchart syntax (graph TD) with 5 to 8 steps showing the \
         logical flow.\n\n\
         Answer ONLY with the Mermaid code block, starting with ```mermaid and \
         ending with ```."
    )
}

fn capacity_forecaster(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "");
    let team = payload
        .get("team_capacity")
        .map_or_else(|| "[]".to_string(), ToString::to_string);
    format!(
        "You are a resource planning analyst for the project \"{name}\".\n\
         The team capacity, in hours per week per role, is: {team}\n\n\
         - Compare the estimated workload against team capacity over four weeks.\n\
         - Point out roles that are over or under allocated.\n\
         - Recommend staffing or scope adjustments."
    )
}

fn executive_narrator(payload: &EventPayload) -> String {
    let name = payload_str(payload, "name", "");
    let status = payload_str(payload, "status_summary", "no status reported yet");
    format!(
        "Act as a program director writing for an executive audience.\n\
         Write a concise Markdown status report for the project \"{name}\".\n\n\
         Current status data:\n{status}\n\n\
         Cover overall health, key accomplishments, risks needing attention and \
         next steps. Keep it under 300 words."
    )
}

fn model_for(mapping: &HashMap<String, String>, agent: &str) -> String {
    mapping
        .get(agent)
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Build the full default catalog against a router and model mapping.
#[must_use]
pub fn build_catalog(
    router: &Arc<LlmRouter>,
    model_mapping: &HashMap<String, String>,
) -> Vec<Arc<dyn Agent>> {
    let prompt_agents: [(&str, super::PromptBuilder); 12] = [
        ("market_intel_bot", market_intel),
        ("risk_sentinel", risk_sentinel),
        ("compliance_guardian", compliance_guardian),
        ("go_to_market_copilot", go_to_market),
        ("org_designer", org_designer),
        ("fin_modeler", fin_modeler),
        ("decision_supporter", decision_supporter),
        ("comm_plan_builder", comm_plan),
        ("doc_checklist_builder", doc_checklist),
        ("process_mapper", process_mapper),
        ("capacity_forecaster", capacity_forecaster),
        ("executive_narrator", executive_narrator),
    ];

    let mut catalog: Vec<Arc<dyn Agent>> = prompt_agents
        .into_iter()
        .map(|(name, build)| {
            Arc::new(PromptAgent::new(
                name,
                model_for(model_mapping, name),
                build,
                Arc::clone(router),
            )) as Arc<dyn Agent>
        })
        .collect();

    catalog.push(Arc::new(ScheduleCopilot::new(
        model_for(model_mapping, "schedule_copilot"),
        Arc::clone(router),
    )));
    catalog.push(Arc::new(BrandKitBot::new(
        model_for(model_mapping, "brand_kit_bot"),
        Arc::clone(router),
    )));
    catalog.push(Arc::new(StakeholderGraphBot::new(
        model_for(model_mapping, "stakeholder_graph_bot"),
        Arc::clone(router),
    )));

    catalog
}
