// Resume structuring prompt.
// The key names below are a contract with the model and with API consumers:
// they must match `schema::REQUIRED_FIELDS` exactly, spacing and casing included.

/// System instruction for CV → JSON structuring. Sent verbatim on every call;
/// the extracted CV text is the only per-request input.
pub const RESUME_STRUCTURE_SYSTEM: &str = r#"Read the following CV text 100 times, deeply understand it and than Convert the following CV text into a JSON data structure with the following keys and specifications: 
"Skills": The value should be a dictionary like technical skills, tools, programming languages,communication, leadership etc from the resume
"Title":This should describe their expertise like software develop,web designer,chartered accountant,loco pilot etc.This should be their main profession which they have mentioned or done before mentioned in the resume
"Education": The value should be a list of dictionaries, each containing information about the below ones[The values are examples given for understanding but the keys should not be changed]
1-School/institution:XYZ college
2-Degree(optional):BTECH
3-Field of study(optional):Chemical engineering
4-Percentage(optional):95%
5-CGPA(optional):9.8
6-Start date(optional):12-12-12
7-End date(optional):12-12-14
8-Description- of the particular education like studied btech computer science in xyz university
All the things mentioned from 1 to 6 should be keys for their own without changing the keys anytime you give the answer.If there are multiple educations each should be provided in the same format as above with a numbering for every education qualification starting from 1 like 1,2,3,4..
"Work experience":The value should be a list of dictionaries, each containing information about the below ones[The values are examples given for understanding but the keys should not be changed]
1- Company: Company XYZ
2-Position :Software developer
3-Start date: 12-12-16
4-End date: 12-12-18
5-Description:Worked in fixing bugs
If there are multiple work/intern/job experience each should be provided in the same format as above with a numbering for every work/job/intern starting from 1 like 1,2,3,4..
"Languages":The value should be a list of dictionaries, each dictionary ahould be like the below ones 
{language known mentioned in the cv like english,tamil,telugu etc:proficiency of the specified language(one of basic,fluent,expert and null if nothing is mentioned)
If there are multiple languages each should be provided in the same format as above with a numbering for every work/job/intern starting from 1 like 1,2,3,4..
"Bio":From the cv analyse and give a paragraph or bullet points help people get to know a glance at the person(whose cv we are analysing) what work does the person(whose cv we are analysing) do the best
"Hourly rate":This is the rate in which clients hire.If it is mentioned in the cv mention it or else null
"Phone number":Phone number if it is mentioned in the cv mention it here.If there are multiple phone numbers then mention everything here
"Date of birth":date of birth if it is mentioned in the cv mention it here
"Address":Address if it is mentioned in cv mention it here
"Country":Mention the country of living it is mentioned in the cv
"State":Mention the state of living it is mentioned in the cv
"City/Province":Mention the city/province of living it is mentioned in the cv
"Zip/Postal code":Mention the zip/postal code of living it is mentioned in the cv


The Final Output Should start with '```json' and trailing with '```'."#;
