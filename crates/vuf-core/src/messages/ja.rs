//! Japanese catalog

pub(super) const MESSAGES: &[(&str, &str)] = &[
	("required", "※必須入力項目です。"),
	("minLength", "{0}文字以上で入力してください。"),
	("maxLength", "{0}文字以内で入力してください。"),
	("length", "{0}文字で入力してください。"),
	("textLength", "{0}文字で入力してください。"),
	("minValue", "{param}は{0}以上の値を入力してください。"),
	("maxValue", "{param}は{0}以下の値を入力してください。"),
	("between", "{param}は{0}から{1}の範囲で入力してください。"),
	("alpha", "{param}は半角英字で入力してください。"),
	("alphaNum", "{param}は半角英数字で入力してください。"),
	("numeric", "{param}は数値で入力してください。"),
	("integer", "整数で入力してください。"),
	("positiveInteger", "0以上の整数で入力してください。"),
	("email", "メールアドレスの形式が正しくありません。"),
	("isEmail", "メールアドレスの形式が正しくありません。"),
	("ipAddress", "{param}はIPアドレスの形式で入力してください。"),
	("macAddress", "{param}はMACアドレスの形式で入力してください。"),
	("url", "{param}はURLの形式で入力してください。"),
	("tel", "電話番号の形式が正しくありません。"),
	("requiredIf", "※必須入力項目です。"),
	("requiredUnless", "{param}が未入力の場合は必須です。"),
	("requiredTos", "{param}に同意してください。"),
	("sameAs", "{param}と同じ値を入力してください。"),
	("anyCondition", "入力内容に誤りがあります。"),
	("gt", "{param}は{paramCompared}より大きい値を入力してください。"),
	("ge", "{param}は{paramCompared}以上の値を入力してください。"),
	("lt", "{param}は{paramCompared}より小さい値を入力してください。"),
	("le", "{param}は{paramCompared}以下の値を入力してください。"),
	("gtStr", "{param}は{paramCompared}より後の値を入力してください。"),
	("validationError", "検証中にエラーが発生しました"),
];
