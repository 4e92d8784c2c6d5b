//! English catalog

pub(super) const MESSAGES: &[(&str, &str)] = &[
	("required", "Required."),
	("minLength", "Please enter at least {0} characters."),
	("maxLength", "Please enter no more than {0} characters."),
	("length", "Please enter exactly {0} characters."),
	("textLength", "Please enter exactly {0} characters."),
	("minValue", "{param} must be {0} or greater."),
	("maxValue", "{param} must be {0} or less."),
	("between", "{param} must be between {0} and {1}."),
	("alpha", "{param} may only contain letters."),
	("alphaNum", "{param} may only contain letters and numbers."),
	("numeric", "{param} must be a number."),
	("integer", "Please enter a whole number."),
	("positiveInteger", "Please enter a whole number of 0 or more."),
	("email", "Please enter a valid email address."),
	("isEmail", "Please enter a valid email address."),
	("ipAddress", "{param} must be a valid IP address."),
	("macAddress", "{param} must be a valid MAC address."),
	("url", "{param} must be a valid URL."),
	("tel", "Please enter a valid phone number."),
	("requiredIf", "Required."),
	("requiredUnless", "Required unless {param} is filled in."),
	("requiredTos", "Please accept the {param}."),
	("sameAs", "Must match {param}."),
	("anyCondition", "The value is invalid."),
	("gt", "{param} must be greater than {paramCompared}."),
	("ge", "{param} must be greater than or equal to {paramCompared}."),
	("lt", "{param} must be less than {paramCompared}."),
	("le", "{param} must be less than or equal to {paramCompared}."),
	("gtStr", "{param} must come after {paramCompared}."),
	("validationError", "An error occurred during validation."),
];
