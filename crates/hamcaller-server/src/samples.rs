//! Built-in sample transcripts for `hamcaller classify` without input

use hamcaller_core::Label;

/// A labelled example call
#[derive(Debug, Clone, Copy)]
pub struct SampleTranscript {
    pub title: &'static str,
    pub expected: Label,
    pub transcript: &'static str,
}

pub const SAMPLES: &[SampleTranscript] = &[
    SampleTranscript {
        title: "Extended warranty",
        expected: Label::Spam,
        transcript: "Hello! This is Jennifer calling about your vehicle's extended warranty. \
            Our records show that your car's warranty is about to expire, and this is a \
            limited time offer to extend your coverage. Packages start at just $49.99 per \
            month. Press 1 to speak with a specialist or press 2 to be removed from our list.",
    },
    SampleTranscript {
        title: "Timeshare offer",
        expected: Label::Spam,
        transcript: "Congratulations! You've been selected to receive a complimentary 3-day, \
            2-night stay at our luxury resort in Cancun. There's no cost, you just need to \
            attend a brief 90-minute presentation about our vacation ownership opportunities. \
            You must claim this offer within the next 48 hours. Can I get your email address?",
    },
    SampleTranscript {
        title: "Doctor appointment",
        expected: Label::Legitimate,
        transcript: "Hi, this is Sarah from Dr. Johnson's office calling to confirm your \
            appointment tomorrow at 2:30 PM. If you need to reschedule, please call us back \
            at 555-0123. Please bring your insurance card and arrive 15 minutes early.",
    },
    SampleTranscript {
        title: "Package delivery",
        expected: Label::Legitimate,
        transcript: "Hello, this is Mike from FedEx about a package for 123 Main Street. I \
            attempted delivery this morning but no one was home and it needs a signature. I \
            can try again tomorrow between 10 AM and 2 PM, or you can pick it up at our \
            facility at 456 Oak Avenue.",
    },
    SampleTranscript {
        title: "Debt consolidation",
        expected: Label::Spam,
        transcript: "Good afternoon! I'm calling from National Debt Solutions. You may qualify \
            for our debt consolidation program that could cut your monthly payments by up to \
            50 percent. I just need to verify a few pieces of information. How much total \
            debt are you currently carrying?",
    },
    SampleTranscript {
        title: "Bank fraud alert",
        expected: Label::Legitimate,
        transcript: "Hello, this is the fraud department at First National Bank. We've seen \
            unusual activity on your checking account ending in 4567. For your security, \
            please call us back at the number on the back of your debit card, and do not \
            share any information until you have verified this call.",
    },
];
