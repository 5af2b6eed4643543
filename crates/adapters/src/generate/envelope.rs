// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use mage_core::GenerationRequest;

/// Assemble the instruction text sent to every backend.
///
/// The prompt template and prior context are inserted verbatim.
pub fn build_envelope(request: &GenerationRequest) -> String {
    format!(
        "CONTEXT:\n\
         You are an AI Agent named \"{name}\" inside the \"Infinite Affiliate Machine\" system.\n\
         Target Domain: {domain}\n\
         Target Niche: {niche}\n\
         \n\
         YOUR SYSTEM INSTRUCTION:\n\
         {prompt}\n\
         \n\
         PREVIOUS STEP CONTEXT (If any):\n\
         {context}\n\
         \n\
         TASK:\n\
         Execute your directives immediately.\n\
         Do not explain what you are doing, just provide the final OUTPUT of your work.\n\
         If the output format is JSON, ensure it is valid JSON.\n",
        name = request.agent_name,
        domain = request.domain,
        niche = request.niche,
        prompt = request.prompt,
        context = request.prior_context,
    )
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
