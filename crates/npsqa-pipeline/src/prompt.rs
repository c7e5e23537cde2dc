/// System instruction pinning the answer language.
pub fn system_prompt(language_name: &str) -> String {
    format!(
        "You are an expert assistant for the National Pension System (NPS) in India. \n\
Your role is to provide accurate, helpful, and detailed information about NPS.\n\
You MUST provide your entire response in {language_name}.\n\
Even if the context is in English, you must translate the relevant information and respond ONLY in {language_name}.\n\
\n\
Use the provided context to answer questions accurately. If you're not sure about something, say so.\n\
Be concise but comprehensive. Use bullet points and formatting when helpful."
    )
}

pub fn build_prompt(query: &str, context: &str, language_name: &str) -> String {
    format!(
        "{}\n\nContext from NPS knowledge base (in English):\n{context}\n\nUser Question: {query}\n\n\
Please provide a detailed and accurate answer in {language_name} based on the context above:",
        system_prompt(language_name)
    )
}
