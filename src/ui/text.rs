//! Static screen text in each survey language
//!
//! Question and option text comes from the backend; this covers the rest.

use crate::state::Language;

pub struct UiText {
    pub app_title: &'static str,
    pub progress: &'static str,
    pub continue_: &'static str,
    pub back: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub cancel: &'static str,
    pub edit: &'static str,
    pub try_different: &'static str,
    pub verifying: &'static str,
    pub loading: &'static str,
    pub retry: &'static str,

    pub review_title: &'static str,
    pub review_subtitle: &'static str,
    pub nothing_answered: &'static str,

    pub mobile_number: &'static str,
    pub enter_mobile: &'static str,
    pub mobile_helper: &'static str,

    pub disclaimer_title: &'static str,
    pub survey_info_heading: &'static str,
    pub survey_info_text: &'static str,
    pub privacy_heading: &'static str,
    pub privacy_points: [&'static str; 6],
    pub disclaimer_note: &'static str,
    pub disclaimer_acknowledge: &'static str,
    pub disclaimer_button: &'static str,

    pub consent_title: &'static str,
    pub consent_heading: &'static str,
    pub consent_check: &'static str,

    pub already_submitted_title: &'static str,
    pub already_submitted_message: &'static str,
    pub already_submitted_note: &'static str,
    pub thank_you_message: &'static str,

    pub thank_you_title: &'static str,
    pub thank_you_text: &'static str,
    pub thank_you_no_details: &'static str,
    pub reference_id_label: &'static str,
}

static EN: UiText = UiText {
    app_title: "Women Empowerment Survey",
    progress: "Progress",
    continue_: "Continue",
    back: "Back",
    submit: "Submit Survey",
    submitting: "Submitting...",
    cancel: "Cancel",
    edit: "Edit Responses",
    try_different: "Try Different Number",
    verifying: "Verifying...",
    loading: "Loading survey...",
    retry: "Retry",

    review_title: "Review Your Responses",
    review_subtitle: "Please review all your answers before submitting",
    nothing_answered: "Not answered",

    mobile_number: "Mobile Number",
    enter_mobile: "Enter 10-digit mobile number",
    mobile_helper: "Your mobile number is used only to prevent duplicate submissions",

    disclaimer_title: "Women Empowerment Survey - Important Information",
    survey_info_heading: "Survey Information",
    survey_info_text: "Welcome! This survey helps us understand the needs and aspirations of women in our community to design better support programs.",
    privacy_heading: "Privacy & Data Collection",
    privacy_points: [
        "No personal identification information is collected",
        "Your responses are completely anonymous",
        "Only your mobile number is collected to prevent duplicate submissions",
        "Data is used solely for women empowerment initiatives",
        "We do not share your information with any third parties",
        "Your data is securely stored and protected",
    ],
    disclaimer_note: "Note:",
    disclaimer_acknowledge: "By proceeding, you acknowledge that you understand the survey purpose and consent to the data collection practices described above.",
    disclaimer_button: "I Understand - Proceed to Survey",

    consent_title: "Data Privacy Acknowledgment",
    consent_heading: "Your Privacy Matters",
    consent_check: "I acknowledge that my responses will be used only for program planning and will not be shared with third parties",

    already_submitted_title: "Response Already Submitted",
    already_submitted_message: "A response has already been submitted from this mobile number.",
    already_submitted_note: "Each mobile number can submit the survey only once to ensure data integrity.",
    thank_you_message: "Thank you for your participation!",

    thank_you_title: "Thank You!",
    thank_you_text: "Your response has been recorded.",
    thank_you_no_details: "No personal details were collected.",
    reference_id_label: "Your Reference ID:",
};

static TE: UiText = UiText {
    app_title: "మహిళా సాధికారత సర్వే",
    progress: "పురోగతి",
    continue_: "కొనసాగించు",
    back: "మునుపటి పేజీ",
    submit: "సర్వే సమర్పించండి",
    submitting: "సమర్పిస్తోంది...",
    cancel: "రద్దు చేయి",
    edit: "సమాధానాలను సవరించు",
    try_different: "వేరే నంబర్ ప్రయత్నించండి",
    verifying: "ధృవీకరిస్తోంది...",
    loading: "సర్వే లోడ్ అవుతోంది...",
    retry: "మళ్లీ ప్రయత్నించండి",

    review_title: "మీ సమాధానాలను సమీక్షించండి",
    review_subtitle: "దయచేసి సమర్పించే ముందు మీ అన్ని సమాధానాలను సమీక్షించండి",
    nothing_answered: "సమాధానం లేదు",

    mobile_number: "మొబైల్ నంబర్",
    enter_mobile: "10-అంకెల మొబైల్ నంబర్ నమోదు చేయండి",
    mobile_helper: "పునరావృత దరఖాస్తులను నివారించడానికి మాత్రమే మీ మొబైల్ నంబర్ ఉపయోగించబడుతుంది.",

    disclaimer_title: "మహిళా సాధికారత సర్వే - ముఖ్యమైన సమాచారం",
    survey_info_heading: "సర్వే సమాచారం",
    survey_info_text: "స్వాగతం! మంచి మద్దతు కార్యక్రమాలను రూపొందించడానికి మా సమాజంలోని మహిళల అవసరాలు మరియు ఆకాంక్షలను అర్థం చేసుకోవడానికి ఈ సర్వే మాకు సహాయం చేస్తుంది.",
    privacy_heading: "గోప్యత & డేటా సేకరణ",
    privacy_points: [
        "వ్యక్తిగత గుర్తింపు సమాచారం సేకరించబడదు",
        "మీ ప్రతిస్పందనలు పూర్తిగా అనామకంగా ఉంటాయి",
        "డూప్లికేట్ సమర్పణలను నివారించడానికి మీ మొబైల్ నంబర్ మాత్రమే సేకరించబడుతుంది",
        "డేటా మహిళా సాధికారత కార్యక్రమాల కోసం మాత్రమే ఉపయోగించబడుతుంది",
        "మేము మీ సమాచారాన్ని మూడవ పక్షాలతో భాగస్వామ్యం చేయము",
        "మీ డేటా సురక్షితంగా నిల్వ చేయబడి రక్షించబడుతుంది",
    ],
    disclaimer_note: "గమనిక:",
    disclaimer_acknowledge: "కొనసాగడం ద్వారా, మీరు సర్వే ఉద్దేశ్యాన్ని అర్థం చేసుకున్నారని మరియు పైన వివరించిన డేటా సేకరణ పద్ధతులకు సమ్మతిస్తున్నారని మీరు అంగీకరిస్తున్నారు.",
    disclaimer_button: "నేను అర్థం చేసుకున్నాను - సర్వేకు కొనసాగండి",

    consent_title: "డేటా గోప్యత అంగీకారం",
    consent_heading: "మీ గోప్యత ముఖ్యం",
    consent_check: "నా ప్రతిస్పందనలు కార్యక్రమ ప్రణాళిక కోసం మాత్రమే ఉపయోగించబడతాయని మరియు మూడవ పక్షాలతో భాగస్వామ్యం చేయబడవని నేను అంగీకరిస్తున్నాను",

    already_submitted_title: "ప్రతిస్పందన ఇప్పటికే సమర్పించబడింది",
    already_submitted_message: "ఈ మొబైల్ నంబర్ నుండి ఇప్పటికే ప్రతిస్పందన సమర్పించబడింది.",
    already_submitted_note: "డేటా సమగ్రతను నిర్ధారించడానికి ప్రతి మొబైల్ నంబర్ ఒకసారి మాత్రమే సర్వే సమర్పించగలదు.",
    thank_you_message: "మీ భాగస్వామ్యానికి ధన్యవాదాలు!",

    thank_you_title: "ధన్యవాదాలు!",
    thank_you_text: "మీ ప్రతిస్పందన రికార్డ్ చేయబడింది.",
    thank_you_no_details: "వ్యక్తిగత వివరాలు సేకరించబడలేదు.",
    reference_id_label: "మీ రిఫరెన్స్ ID:",
};

pub fn ui_text(language: Language) -> &'static UiText {
    match language {
        Language::En => &EN,
        Language::Te => &TE,
    }
}
